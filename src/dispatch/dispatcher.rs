/*!
Dispatcher: raw tokens in, `CommandResult` out. Never panics out.

Resolution order:
  1. `help` (or an unambiguous prefix of it)
       help            -> listing of every enabled command, sorted by name
       help <name>     -> usage text of <name>, or "<name> is not a known command"
  2. parse through the grammar
       declared error raised by a value parser -> same wrapping as run()
       first token is a known command          -> that command's usage text
       otherwise                               -> raw parser error
  3. lookup + fresh instance + run()
  4. wrap: Ok -> OK; User -> "Failed to run command ..."; Internal -> trace
*/

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use clap::error::ErrorKind as ClapErrorKind;
use tracing::{debug, info, warn};

use super::error::{CommandError, CommandOutcome};
use super::grammar::{declared_error, render_error};
use super::manifest::ParsedArgs;
use super::registry::Registry;
use super::result::CommandResult;
use crate::cmd::Services;

pub const HELP: &str = "help";

pub struct Dispatcher {
    registry: Registry,
    services: Services,
}

impl Dispatcher {
    pub fn new(registry: Registry, services: Services) -> Self {
        Self { registry, services }
    }

    #[cfg(test)]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Total entry point: every input, including `[]`, yields a result.
    pub fn run_command<S: AsRef<str>>(&self, tokens: &[S]) -> CommandResult {
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
        debug!(?tokens, "dispatching");
        match panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(&tokens))) {
            Ok(result) => result,
            Err(payload) => {
                let name = tokens.first().copied().unwrap_or("<none>");
                let message = panic_message(payload.as_ref());
                warn!(command = name, %message, "command panicked");
                CommandResult::error(internal_failure(name, &message, "(panicked)"))
            }
        }
    }

    fn dispatch(&self, tokens: &[&str]) -> CommandResult {
        if let Some(first) = tokens.first()
            && self.is_help(first)
        {
            return self.help(tokens.get(1).copied());
        }

        let (name, matches) = match self.registry.grammar().parse(tokens) {
            Ok(parsed) => parsed,
            Err(err) => return self.parse_failure(tokens, &err),
        };
        let entry = match self.registry.lookup(&name) {
            Ok(entry) => entry,
            Err(err) => return CommandResult::error(err.to_string()),
        };

        let command = entry.instantiate(&self.services);
        let outcome = command.run(&ParsedArgs::new(name.as_str(), matches));
        wrap_outcome(&name, outcome)
    }

    /// "help", "hel", "he", "h" -- unless a registered name shares the prefix.
    fn is_help(&self, token: &str) -> bool {
        if token == HELP {
            return true;
        }
        !token.is_empty()
            && HELP.starts_with(token)
            && !self.registry.names().any(|n| n.starts_with(token))
    }

    fn help(&self, topic: Option<&str>) -> CommandResult {
        match topic {
            None | Some(HELP) => CommandResult::ok(self.listing()),
            Some(name) => match self.registry.lookup(name) {
                Ok(entry) => CommandResult::ok(entry.usage()),
                Err(err) => CommandResult::ok(err.to_string()),
            },
        }
    }

    fn listing(&self) -> String {
        let mut text = String::from("Available commands:");
        for entry in self.registry.all() {
            let m = entry.manifest();
            text.push_str(&format!("\n{} -- {}", m.name, m.description));
        }
        text
    }

    fn parse_failure(&self, tokens: &[&str], err: &clap::Error) -> CommandResult {
        if matches!(
            err.kind(),
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion
        ) {
            return CommandResult::ok(render_error(err));
        }

        let first = tokens.first().copied();
        if let Some(declared) = declared_error(err) {
            let name = first.unwrap_or("<none>");
            info!(command = name, error = %declared, "argument rejected");
            return CommandResult::error(failure_message(name, declared));
        }

        match first.and_then(|t| self.registry.lookup(t).ok()) {
            Some(entry) => {
                info!(command = entry.name(), kind = ?err.kind(), "malformed arguments");
                CommandResult::error(entry.usage())
            }
            None => {
                info!(kind = ?err.kind(), "unparseable command line");
                CommandResult::error(render_error(err))
            }
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Outcome wrapping                                                           */
/* -------------------------------------------------------------------------- */

fn wrap_outcome(name: &str, outcome: CommandOutcome) -> CommandResult {
    match outcome {
        Ok(value) => {
            debug!(command = name, "command succeeded");
            CommandResult::ok(value)
        }
        Err(err) => {
            if err.is_user() {
                info!(command = name, error = %err, "command rejected input");
            } else {
                warn!(command = name, error = ?err, "command failed");
            }
            CommandResult::error(failure_message(name, &err))
        }
    }
}

fn failure_message(name: &str, err: &CommandError) -> String {
    match err {
        CommandError::User(message) => {
            format!("Failed to run command '{name}' with error:\n{message}")
        }
        CommandError::Internal(inner) => {
            internal_failure(name, &inner.to_string(), &format!("{inner:?}"))
        }
    }
}

fn internal_failure(name: &str, message: &str, trace: &str) -> String {
    format!("Internal error running command: {name}.\n\n{message}\n{trace}")
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/* --------------------------------- Tests ---------------------------------- */
