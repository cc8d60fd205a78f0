/*!
Argument grammar shared by every command.

One root `clap::Command` owns the command selector; each registered command
contributes exactly one named subcommand carved out by `add_subcommand` and
installed with `attach`. Field coercion happens inside clap value parsers, so
a coercion that fails with `CommandError::User` travels back as the source of
the `clap::Error` and can be recovered with `declared_error`.
*/

use std::error::Error as _;

use clap::{ArgMatches, ColorChoice};

use super::error::CommandError;

/// Name the root parser reports in usage lines.
pub const PROGRAM: &str = "f1bot";

#[derive(Debug, Clone)]
pub struct Grammar {
    root: clap::Command,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar {
    pub fn new() -> Self {
        let root = clap::Command::new(PROGRAM)
            .no_binary_name(true)
            .subcommand_required(true)
            .disable_help_subcommand(true)
            .subcommand_value_name("COMMAND")
            .subcommand_help_heading("Commands")
            .color(ColorChoice::Never);
        Self { root }
    }

    /// Fresh sub-parser scoped under `name`, not yet part of the grammar.
    pub fn add_subcommand(&self, name: &str, description: &str) -> clap::Command {
        clap::Command::new(name.to_string())
            .about(description.to_string())
            .bin_name(format!("{PROGRAM} {name}"))
            .color(ColorChoice::Never)
    }

    /// Install a configured sub-parser into the command selector.
    pub fn attach(&mut self, parser: clap::Command) {
        self.root = std::mem::take(&mut self.root).subcommand(parser);
    }

    #[cfg(test)]
    pub fn has_subcommand(&self, name: &str) -> bool {
        self.root.find_subcommand(name).is_some()
    }

    /// Parse a token list into (selected command, typed namespace).
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<(String, ArgMatches), clap::Error> {
        let mut root = self.root.clone();
        let matches = root.try_get_matches_from_mut(tokens.iter().map(|t| t.as_ref()))?;
        match matches.subcommand() {
            Some((name, sub)) => Ok((name.to_string(), sub.clone())),
            None => Err(root.error(
                clap::error::ErrorKind::MissingSubcommand,
                "no command given",
            )),
        }
    }
}

/// Printable help for one sub-parser.
pub fn usage_text(parser: &clap::Command) -> String {
    parser.clone().render_help().to_string().trim_end().to_string()
}

/// The declared `CommandError` a value parser raised, if that is what failed.
pub fn declared_error(err: &clap::Error) -> Option<&CommandError> {
    let mut source = err.source();
    while let Some(e) = source {
        if let Some(found) = e.downcast_ref::<CommandError>() {
            return Some(found);
        }
        source = e.source();
    }
    None
}

/// Plain-text rendering of a parser error.
pub fn render_error(err: &clap::Error) -> String {
    err.render().to_string().trim_end().to_string()
}
