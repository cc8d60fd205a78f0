/*!
Command capability: the contract every domain command implements, plus the
descriptor the registry consumes.

  trait Command
    manifest()            static identity (name / description / disabled)
    init_parser(parser)   called exactly once at registration
    create(&Services)     fresh instance per invocation
    run(&ParsedArgs)      Ok(CommandValue) | Err(CommandError)

Commands must not keep state between calls; anything shared lives behind
`Services` and is read-only.
*/

use std::any::Any;
use std::fmt;

use clap::ArgMatches;

use super::error::{CommandError, CommandOutcome};
use crate::cmd::Services;

/* -------------------------------------------------------------------------- */
/* Manifest                                                                   */
/* -------------------------------------------------------------------------- */

/// Static descriptive metadata for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manifest {
    pub name: &'static str,
    pub description: &'static str,
    pub disabled: bool,
}

impl Manifest {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            disabled: false,
        }
    }

    /// Same manifest, hidden from lookup, listing and grammar.
    pub const fn disabled(self) -> Self {
        Self {
            disabled: true,
            ..self
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Command trait + descriptor                                                 */
/* -------------------------------------------------------------------------- */

pub trait Command {
    fn manifest() -> Manifest
    where
        Self: Sized;

    /// Add positionals / options to this command's own sub-parser.
    fn init_parser(parser: clap::Command) -> clap::Command
    where
        Self: Sized;

    fn create(services: &Services) -> Self
    where
        Self: Sized;

    fn run(&self, args: &ParsedArgs) -> CommandOutcome;
}

pub type Constructor = fn(&Services) -> Box<dyn Command>;

/// Type-erased entry point for registering one command type.
#[derive(Clone, Copy)]
pub struct CommandDescriptor {
    pub manifest: fn() -> Manifest,
    pub init_parser: fn(clap::Command) -> clap::Command,
    pub construct: Constructor,
}

impl CommandDescriptor {
    pub fn of<C: Command + 'static>() -> Self {
        Self {
            manifest: C::manifest,
            init_parser: C::init_parser,
            construct: construct::<C>,
        }
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("manifest", &(self.manifest)())
            .finish_non_exhaustive()
    }
}

fn construct<C: Command + 'static>(services: &Services) -> Box<dyn Command> {
    Box::new(C::create(services))
}

/* -------------------------------------------------------------------------- */
/* Parsed arguments                                                           */
/* -------------------------------------------------------------------------- */

/// Typed field namespace produced by the grammar for the selected command.
///
/// Accessors never panic: a mismatched type or unknown field id is reported
/// as an internal error (it is a bug in the command, not in the input).
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    command: String,
    matches: ArgMatches,
}

impl ParsedArgs {
    pub fn new(command: impl Into<String>, matches: ArgMatches) -> Self {
        Self {
            command: command.into(),
            matches,
        }
    }

    #[cfg(test)]
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn get<T>(&self, id: &str) -> Result<Option<T>, CommandError>
    where
        T: Any + Clone + Send + Sync + 'static,
    {
        self.matches
            .try_get_one::<T>(id)
            .map(|v| v.cloned())
            .map_err(|e| self.field_error(id, e))
    }

    pub fn required<T>(&self, id: &str) -> Result<T, CommandError>
    where
        T: Any + Clone + Send + Sync + 'static,
    {
        self.get(id)?
            .ok_or_else(|| CommandError::user(format!("missing required argument '{id}'")))
    }

    /// Every value of a multi-valued field (empty if absent).
    pub fn get_all<T>(&self, id: &str) -> Result<Vec<T>, CommandError>
    where
        T: Any + Clone + Send + Sync + 'static,
    {
        self.matches
            .try_get_many::<T>(id)
            .map(|vals| {
                vals.map(|v| v.cloned().collect::<Vec<T>>())
                    .unwrap_or_default()
            })
            .map_err(|e| self.field_error(id, e))
    }

    fn field_error(&self, id: &str, err: clap::parser::MatchesError) -> CommandError {
        CommandError::internal(format!(
            "command '{}' read argument '{id}' incorrectly: {err}",
            self.command
        ))
    }
}
