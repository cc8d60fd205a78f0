//! `results <YEAR> <RACE>... [--session race|qualifying]`
//!
//! RACE is free text (several words are joined with spaces) matched against
//! race names first and circuit names second.

use clap::{Arg, value_parser};

use super::Services;
use super::parsers::parse_year;
use super::subject::SessionKind;
use crate::dispatch::{Command, CommandOutcome, CommandPrimitive, Manifest, ParsedArgs};
use crate::ergast::queries;

pub struct Results {
    services: Services,
}

impl Command for Results {
    fn manifest() -> Manifest {
        Manifest::new("results", "Show the classification of a race or qualifying.")
    }

    fn init_parser(parser: clap::Command) -> clap::Command {
        parser
            .arg(
                Arg::new("year")
                    .value_name("YEAR")
                    .required(true)
                    .value_parser(parse_year),
            )
            .arg(
                Arg::new("race")
                    .value_name("RACE")
                    .help("Part of the race or circuit name")
                    .required(true)
                    .num_args(1..),
            )
            .arg(
                Arg::new("session")
                    .short('s')
                    .long("session")
                    .value_name("SESSION")
                    .default_value("race")
                    .value_parser(value_parser!(SessionKind)),
            )
    }

    fn create(services: &Services) -> Self {
        Self {
            services: services.clone(),
        }
    }

    fn run(&self, args: &ParsedArgs) -> CommandOutcome {
        let year = self.services.season(args.required::<u16>("year")?)?;
        let query = args.get_all::<String>("race")?.join(" ");
        let session = args.get::<SessionKind>("session")?.unwrap_or_default();

        let race = queries::resolve_race(self.services.source(), year, &query)?;
        let table = match session {
            SessionKind::Race => queries::race_results(&race)?,
            SessionKind::Qualifying => queries::qualifying_results(&race)?,
        };
        let header = format!(
            "{} {} (round {}, {}): {}",
            race.year,
            race.name,
            race.round,
            race.circuit,
            session.title()
        );
        Ok(vec![CommandPrimitive::Text(header), CommandPrimitive::Table(table)].into())
    }
}
