//! Tagged outcome of one dispatch call.

use std::fmt;

use serde::Serialize;

use super::value::CommandValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CommandStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl CommandStatus {
    pub fn name(&self) -> &'static str {
        match self {
            CommandStatus::Ok => "OK",
            CommandStatus::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable status + value pair. On error the value is a text diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandResult {
    status: CommandStatus,
    value: CommandValue,
}

impl CommandResult {
    pub fn ok(value: impl Into<CommandValue>) -> Self {
        Self {
            status: CommandStatus::Ok,
            value: value.into(),
        }
    }

    pub fn error(value: impl Into<CommandValue>) -> Self {
        Self {
            status: CommandStatus::InternalError,
            value: value.into(),
        }
    }

    pub fn status(&self) -> CommandStatus {
        self.status
    }

    pub fn value(&self) -> &CommandValue {
        &self.value
    }

    pub fn is_error(&self) -> bool {
        self.status == CommandStatus::InternalError
    }
}

#[cfg(test)]
impl CommandResult {
    pub fn is_ok(&self) -> bool {
        self.status == CommandStatus::Ok
    }

    /// Text payload, if the value is a single text block (always true for errors).
    pub fn text(&self) -> Option<&str> {
        self.value.as_text()
    }
}
