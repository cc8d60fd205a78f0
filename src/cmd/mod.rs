/*!
Domain commands and the services they share.

Directory Layout:
  src/cmd/
    mod.rs          (this file: Services, builtin table, dispatcher wiring)
    subject.rs      (StandingsKind / SessionKind value enums)
    parsers.rs      (parse_year)
    schedule.rs     schedule <YEAR>
    standings.rs    standings <drivers|constructors> [YEAR]
    results.rs      results <YEAR> <RACE>... [--session race|qualifying]
    upcoming.rs     upcoming

Conventions:
  - Each command is a unit struct implementing `dispatch::Command`.
  - Commands read data only through `Services`; they never print.
  - New commands are added to `builtin_descriptors()`; nothing registers
    itself implicitly.
*/

pub mod parsers;
pub mod results;
pub mod schedule;
pub mod standings;
pub mod subject;
pub mod upcoming;

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::debug;

use crate::dispatch::{CommandDescriptor, CommandError, Dispatcher, RegistryBuilder};
use crate::ergast::ErgastSource;
use crate::utils::Clock;

pub use results::Results;
pub use schedule::Schedule;
pub use standings::Standings;
pub use subject::{SessionKind, StandingsKind};
pub use upcoming::Upcoming;

/// Read-only collaborators handed to every command instance.
#[derive(Clone)]
pub struct Services {
    source: Arc<dyn ErgastSource>,
    clock: Arc<dyn Clock>,
}

impl Services {
    pub fn new(source: Arc<dyn ErgastSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    pub fn source(&self) -> &dyn ErgastSource {
        self.source.as_ref()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Season the clock is in.
    pub fn current_season(&self) -> Result<u16, CommandError> {
        let year = self.clock.year();
        u16::try_from(year)
            .map_err(|_| CommandError::internal(format!("clock year {year} is out of range")))
    }

    /// Reject a parsed season that the clock has not reached yet.
    pub fn season(&self, year: u16) -> Result<u16, CommandError> {
        if year > self.current_season()? {
            return Err(CommandError::user(parsers::FUTURE_SEASON));
        }
        Ok(year)
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// Every built-in command, in no particular order.
pub fn builtin_descriptors() -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor::of::<Schedule>(),
        CommandDescriptor::of::<Standings>(),
        CommandDescriptor::of::<Results>(),
        CommandDescriptor::of::<Upcoming>(),
    ]
}

/// Register the built-ins, freeze the registry and wrap it in a dispatcher.
pub fn build_dispatcher(services: Services) -> Result<Dispatcher> {
    let mut builder = RegistryBuilder::new();
    builder
        .register_all(builtin_descriptors())
        .context("failed to register built-in commands")?;
    let registry = builder.build();
    if registry.is_empty() {
        anyhow::bail!("no commands registered");
    }
    debug!(commands = registry.len(), "dispatcher ready");
    Ok(Dispatcher::new(registry, services))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use proptest::prelude::*;

    #[test]
    fn builtins_register_cleanly() {
        let d = build_dispatcher(testing::services()).unwrap();
        let names: Vec<_> = d.registry().names().collect();
        assert_eq!(names, vec!["results", "schedule", "standings", "upcoming"]);
    }

    #[test]
    fn help_lists_builtins() {
        let d = build_dispatcher(testing::services()).unwrap();
        let r = d.run_command(&["help"]);
        let text = r.text().unwrap();
        assert!(text.starts_with("Available commands:\nresults -- "));
        assert!(text.contains("\nupcoming -- "));
    }

    #[test]
    fn season_follows_injected_clock() {
        let services = testing::services();
        assert_eq!(services.season(2023).unwrap(), 2023);
        let err = services.season(2024).unwrap_err();
        assert!(err.is_user());
        assert_eq!(err.to_string(), "That year hasn't happened yet.");
    }

    #[test]
    fn help_prefix_reaches_listing() {
        let d = build_dispatcher(testing::services()).unwrap();
        assert_eq!(d.run_command(&["h"]), d.run_command(&["help"]));
    }

    fn token() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("schedule".to_string()),
            Just("standings".to_string()),
            Just("results".to_string()),
            Just("upcoming".to_string()),
            Just("drivers".to_string()),
            Just("constructors".to_string()),
            Just("-s".to_string()),
            Just("q".to_string()),
            Just("abu".to_string()),
            Just("grand prix".to_string()),
            Just("--help".to_string()),
            "(19|20)[0-9]{2}",
            "-?[0-9]{1,25}",
            ".{0,12}",
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn builtins_are_total(tokens in prop::collection::vec(token(), 0..6)) {
            let d = build_dispatcher(testing::services()).unwrap();
            let r = d.run_command(&tokens);
            if r.is_error() {
                prop_assert!(r.text().is_some());
            }
        }
    }
}
