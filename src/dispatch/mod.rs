/*!
Command registration and dispatch framework shared by both front ends.

Layout:
  src/dispatch/
    mod.rs          (this file: re-exports)
    manifest.rs     Manifest, Command trait, CommandDescriptor, ParsedArgs
    grammar.rs      shared clap grammar, usage text, declared-error recovery
    registry.rs     RegistryBuilder (open) -> Registry (frozen)
    dispatcher.rs   Dispatcher::run_command (total)
    value.rs        CommandValue / CommandPrimitive / Table / Cell
    result.rs       CommandStatus / CommandResult
    error.rs        CommandError (User | Internal)

Conventions:
  - Commands return `CommandOutcome`; they never print.
  - Front ends only branch on `CommandResult::status`.
*/

pub mod dispatcher;
pub mod error;
pub mod grammar;
pub mod manifest;
pub mod registry;
pub mod result;
pub mod value;

pub use dispatcher::Dispatcher;
pub use error::{CommandError, CommandOutcome};
pub use manifest::{Command, CommandDescriptor, Manifest, ParsedArgs};
pub use registry::RegistryBuilder;
pub use result::{CommandResult, CommandStatus};
pub use value::{Cell, CommandPrimitive, CommandValue, Table};
