use crate::actors::messages::{AppError, SupervisorMessage};
use crate::dialogue::{DialogueEngine, TurnOutcome};
use crate::session::SessionStore;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{error, info, instrument};
use uuid::Uuid;

const TURN_TIMEOUT: Duration = Duration::from_secs(30);
const ADMIN_TIMEOUT: Duration = Duration::from_secs(10);

/// A handle to the `SupervisorActor`.
///
/// This is the single entry point for conversation turns. The actor owns the
/// dialogue engine and processes one message at a time, so two turns for the
/// same session never interleave.
#[derive(Clone)]
pub struct SupervisorHandle {
    sender: mpsc::Sender<SupervisorMessage>,
}

impl SupervisorHandle {
    /// Spawns a supervisor over `store` with randomized reply wording.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::new_with_engine(store, DialogueEngine::default())
    }

    /// Spawns a supervisor with a caller-built engine (fixed wording in tests).
    pub fn new_with_engine(store: Arc<dyn SessionStore>, engine: DialogueEngine) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let actor = SupervisorRunner::new(receiver, store, engine);
        tokio::spawn(async move { actor.run().await });
        Self { sender }
    }

    /// Processes one user message for a session.
    ///
    /// The session is created on first use. Empty `session_id` or `content`
    /// is rejected before the actor sees it, so no session is touched.
    #[instrument(skip(self, content))]
    pub async fn process_message(
        &self,
        session_id: String,
        content: String,
    ) -> Result<TurnOutcome, AppError> {
        if session_id.is_empty() || content.is_empty() {
            return Err(AppError::Validation(
                "session_id and content are required".to_string(),
            ));
        }
        let (send, recv) = oneshot::channel();
        let msg = SupervisorMessage::ProcessUserMessage {
            session_id,
            content,
            responder: send,
        };
        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(TURN_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }

    /// Removes every session and returns how many there were.
    #[instrument(skip(self))]
    pub async fn clear_sessions(&self) -> Result<usize, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(SupervisorMessage::ClearSessions { responder: send })
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(ADMIN_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn session_count(&self) -> Result<usize, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(SupervisorMessage::SessionCount { responder: send })
            .await
            .map_err(|e| AppError::Actor(e.to_string()))?;
        timeout(ADMIN_TIMEOUT, recv)
            .await?
            .map_err(|e| AppError::Actor(e.to_string()))?
    }

    /// Asks the actor loop to stop. Later calls on any clone fail with `AppError::Actor`.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(SupervisorMessage::Shutdown)
            .await
            .map_err(|e| AppError::Actor(e.to_string()))
    }
}

// --- Actor Runner ---
struct SupervisorRunner {
    receiver: mpsc::Receiver<SupervisorMessage>,
    store: Arc<dyn SessionStore>,
    engine: DialogueEngine,
}

impl SupervisorRunner {
    fn new(
        receiver: mpsc::Receiver<SupervisorMessage>,
        store: Arc<dyn SessionStore>,
        engine: DialogueEngine,
    ) -> Self {
        Self {
            receiver,
            store,
            engine,
        }
    }

    async fn run(mut self) {
        info!("Supervisor started");
        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, SupervisorMessage::Shutdown) {
                info!("Supervisor shutting down...");
                break;
            }
            self.handle_message(msg).await;
        }
        info!("Supervisor stopped");
    }

    #[instrument(skip(self, msg), fields(message_type = msg.kind()))]
    async fn handle_message(&mut self, msg: SupervisorMessage) {
        match msg {
            SupervisorMessage::ProcessUserMessage {
                session_id,
                content,
                responder,
            } => {
                let result = self.handle_user_message(session_id, content).await;
                if let Err(e) = &result {
                    error!("Error processing user message: {:?}", e);
                }
                let _ = responder.send(result);
            }
            SupervisorMessage::ClearSessions { responder } => {
                let result = self.store.clear_all().await;
                match &result {
                    Ok(cleared) => info!(cleared, "Sessions cleared"),
                    Err(e) => error!("Error clearing sessions: {:?}", e),
                }
                let _ = responder.send(result);
            }
            SupervisorMessage::SessionCount { responder } => {
                let _ = responder.send(self.store.session_count().await);
            }
            SupervisorMessage::Shutdown => {}
        }
    }

    #[instrument(skip(self, content), fields(turn_id = %Uuid::new_v4()))]
    async fn handle_user_message(
        &mut self,
        session_id: String,
        content: String,
    ) -> Result<TurnOutcome, AppError> {
        info!("Supervisor received: {}", content);

        let mut session = self.store.load_or_create(&session_id).await?;
        let outcome = self.engine.run_turn(&mut session, &content);
        self.store.save(session).await?;

        info!(
            stage = ?outcome.snapshot.stage,
            intent = %outcome.intent,
            lookup = outcome.reply.lookup().is_some(),
            "Turn complete"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{templates, FixedPicker, Reply};
    use crate::session::InMemorySessionStore;

    fn setup_supervisor() -> SupervisorHandle {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        SupervisorHandle::new_with_engine(store, DialogueEngine::new(Box::new(FixedPicker(0))))
    }

    #[tokio::test]
    async fn test_supervisor_process_message_nominal() {
        let handle = setup_supervisor();

        let outcome = handle
            .process_message("s1".to_string(), "hola".to_string())
            .await
            .unwrap();

        assert_eq!(outcome.reply, Reply::Text(templates::GREETING.to_string()));
        assert_eq!(outcome.snapshot.messages, 1);
        assert_eq!(handle.session_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_supervisor_rejects_empty_input_without_creating_session() {
        let handle = setup_supervisor();

        let result = handle.process_message(String::new(), "hola".to_string()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        let result = handle.process_message("s1".to_string(), String::new()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        assert_eq!(handle.session_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_supervisor_shutdown_closes_handle() {
        let handle = setup_supervisor();
        handle.shutdown().await.unwrap();

        // Give the runner a chance to drop its receiver.
        tokio::task::yield_now().await;
        let result = handle
            .process_message("s1".to_string(), "hola".to_string())
            .await;
        assert!(matches!(result, Err(AppError::Actor(_))));
    }
}
