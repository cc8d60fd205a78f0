//! Test doubles: stub commands for framework tests and a fixed ergast dataset.

use std::sync::Arc;

use anyhow::anyhow;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Arg, ArgAction};

use crate::cmd::Services;
use crate::dispatch::{Command, CommandError, CommandOutcome, Manifest, ParsedArgs};
use crate::ergast::{Dataset, MemorySource, QualifyingResult, Race, RaceResult, StandingsRow};
use crate::utils::FixedClock;

/* -------------------------------------------------------------------------- */
/* Stub commands                                                              */
/* -------------------------------------------------------------------------- */

pub struct Echo;

impl Echo {
    pub const NAME: &'static str = "echo";
}

impl Command for Echo {
    fn manifest() -> Manifest {
        Manifest::new(Self::NAME, "Repeat the given words.")
    }

    fn init_parser(parser: clap::Command) -> clap::Command {
        parser
            .arg(
                Arg::new("words")
                    .value_name("WORDS")
                    .num_args(1..)
                    .required(true),
            )
            .arg(Arg::new("upper").long("upper").action(ArgAction::SetTrue))
    }

    fn create(_: &Services) -> Self {
        Echo
    }

    fn run(&self, args: &ParsedArgs) -> CommandOutcome {
        let text = args.get_all::<String>("words")?.join(" ");
        let upper = args.get::<bool>("upper")?.unwrap_or(false);
        Ok(if upper { text.to_uppercase() } else { text }.into())
    }
}

/// Same name as `Echo`; used to provoke duplicate registration.
pub struct Shadow;

impl Command for Shadow {
    fn manifest() -> Manifest {
        Manifest::new(Echo::NAME, "Shadows echo.")
    }

    fn init_parser(parser: clap::Command) -> clap::Command {
        parser
    }

    fn create(_: &Services) -> Self {
        Shadow
    }

    fn run(&self, _: &ParsedArgs) -> CommandOutcome {
        Ok("shadow".into())
    }
}

pub struct Disabled;

impl Disabled {
    pub const NAME: &'static str = "retired";
}

impl Command for Disabled {
    fn manifest() -> Manifest {
        Manifest::new(Self::NAME, "Never visible.").disabled()
    }

    fn init_parser(parser: clap::Command) -> clap::Command {
        parser
    }

    fn create(_: &Services) -> Self {
        Disabled
    }

    fn run(&self, _: &ParsedArgs) -> CommandOutcome {
        Ok("should not run".into())
    }
}

/// Fails with the error kind named by its single argument.
pub struct Broken;

impl Broken {
    pub const USER_MESSAGE: &'static str = "No race called that in 2021.";
    pub const INTERNAL_MESSAGE: &'static str = "loading standings";
    pub const INTERNAL_CAUSE: &'static str = "dataset file vanished";
}

impl Command for Broken {
    fn manifest() -> Manifest {
        Manifest::new("broken", "Always fails.")
    }

    fn init_parser(parser: clap::Command) -> clap::Command {
        parser.arg(
            Arg::new("kind")
                .required(true)
                .value_parser(["user", "internal"]),
        )
    }

    fn create(_: &Services) -> Self {
        Broken
    }

    fn run(&self, args: &ParsedArgs) -> CommandOutcome {
        match args.required::<String>("kind")?.as_str() {
            "user" => Err(CommandError::user(Self::USER_MESSAGE)),
            _ => Err(anyhow!(Self::INTERNAL_CAUSE)
                .context(Self::INTERNAL_MESSAGE)
                .into()),
        }
    }
}

pub struct Panics;

impl Panics {
    pub const MESSAGE: &'static str = "index out of range in stub";
}

impl Command for Panics {
    fn manifest() -> Manifest {
        Manifest::new("panics", "Panics when run.")
    }

    fn init_parser(parser: clap::Command) -> clap::Command {
        parser
    }

    fn create(_: &Services) -> Self {
        Panics
    }

    fn run(&self, _: &ParsedArgs) -> CommandOutcome {
        panic!("{}", Self::MESSAGE)
    }
}

/// Positive integer argument coerced by a declared-error value parser.
pub struct Hinted;

impl Hinted {
    pub const REJECTION: &'static str = "Expected a positive number.";
}

fn positive(s: &str) -> Result<u32, CommandError> {
    match s.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::user(Hinted::REJECTION)),
    }
}

impl Command for Hinted {
    fn manifest() -> Manifest {
        Manifest::new("hinted", "Takes a positive number.")
    }

    fn init_parser(parser: clap::Command) -> clap::Command {
        parser.arg(Arg::new("n").required(true).value_parser(positive))
    }

    fn create(_: &Services) -> Self {
        Hinted
    }

    fn run(&self, args: &ParsedArgs) -> CommandOutcome {
        Ok(args.required::<u32>("n")?.to_string().into())
    }
}

/* -------------------------------------------------------------------------- */
/* Fixture dataset                                                            */
/* -------------------------------------------------------------------------- */

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
}

fn standing(name: &str, position: u32, points: f64) -> StandingsRow {
    StandingsRow {
        name: name.into(),
        position,
        points,
    }
}

fn race(year: u16, round: u32, name: &str, circuit: &str, location: &str, day: NaiveDate) -> Race {
    Race {
        year,
        round,
        name: name.into(),
        circuit: circuit.into(),
        location: location.into(),
        date: day,
        time: NaiveTime::from_hms_opt(15, 0, 0),
        fp1: None,
        fp2: None,
        fp3: None,
        qualifying: None,
        sprint: None,
        results: Vec::new(),
        qualifying_results: Vec::new(),
        driver_standings: Vec::new(),
        constructor_standings: Vec::new(),
    }
}

/// Two 2021 rounds (standings only on the last, deliberately unsorted) and
/// three 2023 rounds with session times.
pub fn dataset() -> Dataset {
    let mut bahrain21 = race(
        2021,
        1,
        "Bahrain Grand Prix",
        "Bahrain International Circuit",
        "Sakhir",
        date(2021, 3, 28),
    );
    bahrain21.driver_standings = vec![
        standing("Lewis Hamilton", 1, 25.0),
        standing("Max Verstappen", 2, 18.0),
    ];

    let mut abu_dhabi21 = race(
        2021,
        22,
        "Abu Dhabi Grand Prix",
        "Yas Marina Circuit",
        "Abu Dhabi",
        date(2021, 12, 12),
    );
    abu_dhabi21.time = NaiveTime::from_hms_opt(13, 0, 0);
    abu_dhabi21.driver_standings = vec![
        standing("Valtteri Bottas", 3, 226.0),
        standing("Max Verstappen", 1, 395.5),
        standing("Lewis Hamilton", 2, 387.5),
    ];
    abu_dhabi21.constructor_standings = vec![
        standing("Red Bull", 2, 585.5),
        standing("Mercedes", 1, 613.5),
    ];
    abu_dhabi21.results = vec![
        RaceResult {
            position: Some(2),
            number: Some(44),
            driver: "Lewis Hamilton".into(),
            time: Some("+2.256".into()),
            status: "Finished".into(),
        },
        RaceResult {
            position: Some(1),
            number: Some(33),
            driver: "Max Verstappen".into(),
            time: Some("1:30:17.345".into()),
            status: "Finished".into(),
        },
        RaceResult {
            position: None,
            number: Some(11),
            driver: "Sergio Pérez".into(),
            time: None,
            status: "Oil pressure".into(),
        },
    ];
    abu_dhabi21.qualifying_results = vec![QualifyingResult {
        position: 1,
        number: Some(33),
        driver: "Max Verstappen".into(),
        q1: Some("1:23.322".into()),
        q2: Some("1:23.140".into()),
        q3: Some("1:22.109".into()),
    }];

    let mut bahrain23 = race(
        2023,
        1,
        "Bahrain Grand Prix",
        "Bahrain International Circuit",
        "Sakhir",
        date(2023, 3, 5),
    );
    bahrain23.qualifying = Some(at(2023, 3, 4, 15));

    let mut saudi23 = race(
        2023,
        2,
        "Saudi Arabian Grand Prix",
        "Jeddah Corniche Circuit",
        "Jeddah",
        date(2023, 3, 19),
    );
    saudi23.time = NaiveTime::from_hms_opt(17, 0, 0);

    let mut australia23 = race(
        2023,
        3,
        "Australian Grand Prix",
        "Albert Park Grand Prix Circuit",
        "Melbourne",
        date(2023, 4, 2),
    );
    australia23.time = NaiveTime::from_hms_opt(5, 0, 0);
    australia23.fp1 = Some(at(2023, 3, 31, 1));
    australia23.fp2 = Some(at(2023, 3, 31, 5));
    australia23.fp3 = Some(at(2023, 4, 1, 1));
    australia23.qualifying = Some(at(2023, 4, 1, 5));

    Dataset {
        // Out of order on purpose: queries must sort by round.
        races: vec![saudi23, abu_dhabi21, bahrain23, australia23, bahrain21],
    }
}

/// 2023-03-20 12:00 UTC: after Jeddah, before Melbourne.
pub fn now() -> NaiveDateTime {
    at(2023, 3, 20, 12)
}

pub fn services() -> Services {
    Services::new(
        Arc::new(MemorySource::new(dataset())),
        Arc::new(FixedClock::new(now())),
    )
}
