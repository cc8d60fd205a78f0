//! `standings <drivers|constructors> [YEAR]`: championship table after the
//! last round with standings. YEAR defaults to the current season.

use clap::{Arg, value_parser};

use super::Services;
use super::parsers::parse_year;
use super::subject::StandingsKind;
use crate::dispatch::{Command, CommandOutcome, Manifest, ParsedArgs};
use crate::ergast::queries;

pub struct Standings {
    services: Services,
}

impl Command for Standings {
    fn manifest() -> Manifest {
        Manifest::new("standings", "Show the drivers' or constructors' championship.")
    }

    fn init_parser(parser: clap::Command) -> clap::Command {
        parser
            .arg(
                Arg::new("kind")
                    .value_name("KIND")
                    .required(true)
                    .value_parser(value_parser!(StandingsKind)),
            )
            .arg(
                Arg::new("year")
                    .value_name("YEAR")
                    .help("Season (defaults to the current one)")
                    .value_parser(parse_year),
            )
    }

    fn create(services: &Services) -> Self {
        Self {
            services: services.clone(),
        }
    }

    fn run(&self, args: &ParsedArgs) -> CommandOutcome {
        let kind = args.required::<StandingsKind>("kind")?;
        let year = match args.get::<u16>("year")? {
            Some(year) => self.services.season(year)?,
            None => self.services.current_season()?,
        };
        let table = queries::standings(self.services.source(), kind.championship(), year)?;
        Ok(table.into())
    }
}
