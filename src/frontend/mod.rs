//! Front ends over the shared dispatcher: one-shot CLI and line-based chat.

pub mod chat;
pub mod cli;

pub use chat::ChatSession;
pub use cli::run_once;
