/*!
Command registry.

Two phases, enforced by types:
  - `RegistryBuilder`  open: commands are registered, sub-parsers carved out
                       of the shared grammar.
  - `Registry`         frozen: read-only lookup / listing / grammar access.

Disabled commands are skipped at registration and are therefore invisible to
lookup, listing and parsing. Registering the same enabled name twice is a
start-up error.
*/

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, trace};

use super::grammar::{Grammar, usage_text};
use super::manifest::{Command, CommandDescriptor, Constructor, Manifest};
use crate::cmd::Services;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("command '{0}' is registered more than once")]
    Duplicate(String),
    #[error("{0} is not a known command")]
    NotFound(String),
}

/* -------------------------------------------------------------------------- */
/* Entry                                                                      */
/* -------------------------------------------------------------------------- */

pub struct RegistryEntry {
    manifest: Manifest,
    parser: clap::Command,
    construct: Constructor,
}

impl RegistryEntry {
    pub fn name(&self) -> &'static str {
        self.manifest.name
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn usage(&self) -> String {
        usage_text(&self.parser)
    }

    pub fn instantiate(&self, services: &Services) -> Box<dyn Command> {
        (self.construct)(services)
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("manifest", &self.manifest)
            .finish_non_exhaustive()
    }
}

/* -------------------------------------------------------------------------- */
/* Builder (open phase)                                                       */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    grammar: Grammar,
    entries: BTreeMap<&'static str, RegistryEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<(), RegistryError> {
        let manifest = (descriptor.manifest)();
        if manifest.disabled {
            debug!(command = manifest.name, "skipping disabled command");
            return Ok(());
        }
        if self.entries.contains_key(manifest.name) {
            return Err(RegistryError::Duplicate(manifest.name.to_string()));
        }

        let parser = (descriptor.init_parser)(
            self.grammar
                .add_subcommand(manifest.name, manifest.description),
        );
        self.grammar.attach(parser.clone());
        self.entries.insert(
            manifest.name,
            RegistryEntry {
                manifest,
                parser,
                construct: descriptor.construct,
            },
        );
        trace!(command = manifest.name, "registered command");
        Ok(())
    }

    pub fn register_all<I>(&mut self, descriptors: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = CommandDescriptor>,
    {
        for d in descriptors {
            self.register(d)?;
        }
        Ok(())
    }

    /// Freeze the table. No registration is possible afterwards.
    pub fn build(self) -> Registry {
        debug!(commands = self.entries.len(), "command registry frozen");
        Registry {
            grammar: self.grammar,
            entries: self.entries,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Registry (frozen phase)                                                    */
/* -------------------------------------------------------------------------- */

#[derive(Debug)]
pub struct Registry {
    grammar: Grammar,
    entries: BTreeMap<&'static str, RegistryEntry>,
}

impl Registry {
    pub fn lookup(&self, name: &str) -> Result<&RegistryEntry, RegistryError> {
        self.entries
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entries sorted by name.
    pub fn all(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
