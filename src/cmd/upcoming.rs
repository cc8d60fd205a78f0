//! `upcoming`: the next race weekend of the current season and its sessions.

use super::Services;
use crate::dispatch::{Command, CommandOutcome, CommandPrimitive, Manifest, ParsedArgs};
use crate::ergast::queries;

pub struct Upcoming {
    services: Services,
}

impl Command for Upcoming {
    fn manifest() -> Manifest {
        Manifest::new("upcoming", "Show the next race weekend and its session times.")
    }

    fn init_parser(parser: clap::Command) -> clap::Command {
        parser
    }

    fn create(services: &Services) -> Self {
        Self {
            services: services.clone(),
        }
    }

    fn run(&self, _: &ParsedArgs) -> CommandOutcome {
        let year = self.services.current_season()?;
        let races = queries::season(self.services.source(), year)?;
        let Some(race) = queries::next_race(&races, self.services.now()) else {
            return Ok(format!("No upcoming races found for {year}.").into());
        };

        let header = format!(
            "Next up: {} (round {}) at {}, {}",
            race.name, race.round, race.circuit, race.location
        );
        Ok(vec![
            CommandPrimitive::Text(header),
            CommandPrimitive::Table(queries::weekend_sessions(race)?),
        ]
        .into())
    }
}
