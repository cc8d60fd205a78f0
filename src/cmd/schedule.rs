//! `schedule <YEAR>`: the season calendar as a table.

use clap::Arg;

use super::Services;
use super::parsers::parse_year;
use crate::dispatch::{Command, CommandOutcome, Manifest, ParsedArgs};
use crate::ergast::queries;

pub struct Schedule {
    services: Services,
}

impl Command for Schedule {
    fn manifest() -> Manifest {
        Manifest::new("schedule", "Show the race calendar for a season.")
    }

    fn init_parser(parser: clap::Command) -> clap::Command {
        parser.arg(
            Arg::new("year")
                .value_name("YEAR")
                .help("Season, 1950 or later")
                .required(true)
                .value_parser(parse_year),
        )
    }

    fn create(services: &Services) -> Self {
        Self {
            services: services.clone(),
        }
    }

    fn run(&self, args: &ParsedArgs) -> CommandOutcome {
        let year = self.services.season(args.required::<u16>("year")?)?;
        Ok(queries::schedule(self.services.source(), year)?.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::cmd::build_dispatcher;
    use crate::dispatch::{Cell, CommandStatus};
    use crate::testing;

    #[test]
    fn before_first_season() {
        let d = build_dispatcher(testing::services()).unwrap();
        let r = d.run_command(&["schedule", "1949"]);
        assert_eq!(r.status(), CommandStatus::InternalError);
        assert!(r.text().unwrap().contains("1950"));
        assert!(r.text().unwrap().starts_with("Failed to run command 'schedule'"));
    }

    #[test]
    fn one_row_per_event() {
        let d = build_dispatcher(testing::services()).unwrap();
        let r = d.run_command(&["schedule", "2023"]);
        assert!(r.is_ok());
        let table = r.value().first_table().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.column("Name").unwrap(),
            vec![
                &Cell::from("Bahrain Grand Prix"),
                &Cell::from("Saudi Arabian Grand Prix"),
                &Cell::from("Australian Grand Prix"),
            ]
        );
    }

    #[test]
    fn year_after_fixture_clock() {
        let d = build_dispatcher(testing::services()).unwrap();
        let r = d.run_command(&["schedule", "2024"]);
        assert_eq!(r.status(), CommandStatus::InternalError);
        assert_eq!(
            r.text().unwrap(),
            "Failed to run command 'schedule' with error:\nThat year hasn't happened yet."
        );
    }

    #[test]
    fn season_without_data() {
        let d = build_dispatcher(testing::services()).unwrap();
        let r = d.run_command(&["schedule", "1999"]);
        assert!(r.is_error());
        assert!(r.text().unwrap().ends_with("No races found for 1999."));
    }

    #[test]
    fn missing_year_shows_usage() {
        let d = build_dispatcher(testing::services()).unwrap();
        let r = d.run_command(&["schedule"]);
        assert!(r.is_error());
        assert!(r.text().unwrap().contains("<YEAR>"));
    }
}
