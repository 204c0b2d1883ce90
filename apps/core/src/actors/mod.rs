pub mod messages;
pub mod supervisor;
