use tokio::sync::oneshot;

use crate::dialogue::TurnOutcome;

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the `SupervisorActor`.
#[derive(Debug)]
pub enum SupervisorMessage {
    /// A user message to run through the dialogue for one session.
    ProcessUserMessage {
        session_id: String,
        content: String,
        /// A channel to send the turn outcome back.
        responder: oneshot::Sender<Result<TurnOutcome, AppError>>,
    },
    /// Drop every session. Replies with how many were removed.
    ClearSessions {
        responder: oneshot::Sender<Result<usize, AppError>>,
    },
    /// Number of live sessions.
    SessionCount {
        responder: oneshot::Sender<Result<usize, AppError>>,
    },
    /// A command to stop the supervisor loop.
    Shutdown,
}

impl SupervisorMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            SupervisorMessage::ProcessUserMessage { .. } => "process_user_message",
            SupervisorMessage::ClearSessions { .. } => "clear_sessions",
            SupervisorMessage::SessionCount { .. } => "session_count",
            SupervisorMessage::Shutdown => "shutdown",
        }
    }
}
