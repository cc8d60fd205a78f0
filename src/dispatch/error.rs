/*!
Error kinds recognised at the dispatch boundary.

  - `CommandError::User`     : malformed input, out-of-range years, missing or
                               ambiguous lookups. Shown as a short message.
  - `CommandError::Internal` : everything else (dataset I/O, broken
                               invariants). Shown with a diagnostic trace.

Both are recovered by the dispatcher; nothing here ever reaches a front end
as a raw error.
*/

use std::fmt;

use super::value::{CommandValue, TableError};

/// Two-valued classification tag carried by every `CommandError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UserError,
    InternalError,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// A well-formed failure the user can fix by changing the input.
    #[error("{0}")]
    User(String),

    /// Failures outside the user's control.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CommandError {
    pub fn user(message: impl Into<String>) -> Self {
        CommandError::User(message.into())
    }

    pub fn internal<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        CommandError::Internal(anyhow::Error::msg(message))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::User(_) => ErrorKind::UserError,
            CommandError::Internal(_) => ErrorKind::InternalError,
        }
    }

    pub fn is_user(&self) -> bool {
        self.kind() == ErrorKind::UserError
    }
}

impl From<TableError> for CommandError {
    fn from(err: TableError) -> Self {
        CommandError::Internal(anyhow::Error::new(err))
    }
}

/// What `Command::run` hands back to the dispatcher.
pub type CommandOutcome = Result<CommandValue, CommandError>;
