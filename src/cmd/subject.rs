/*!
Closed argument vocabularies shared by the domain commands.

  StandingsKind   drivers | constructors
  SessionKind     race (r) | qualifying (q)
*/

use std::fmt;

use crate::ergast::queries::Championship;

/// Which championship `standings` reports.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StandingsKind {
    /// Drivers' championship
    Drivers,
    /// Constructors' championship (from 1958)
    Constructors,
}

impl StandingsKind {
    pub fn championship(self) -> Championship {
        match self {
            StandingsKind::Drivers => Championship::Drivers,
            StandingsKind::Constructors => Championship::Constructors,
        }
    }
}

impl fmt::Display for StandingsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StandingsKind::Drivers => "drivers",
            StandingsKind::Constructors => "constructors",
        })
    }
}

/// Session whose classification `results` shows.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum SessionKind {
    #[default]
    #[value(alias = "r")]
    Race,
    #[value(alias = "q")]
    Qualifying,
}

impl SessionKind {
    pub fn title(self) -> &'static str {
        match self {
            SessionKind::Race => "Race",
            SessionKind::Qualifying => "Qualifying",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionKind::Race => "race",
            SessionKind::Qualifying => "qualifying",
        })
    }
}

/* --------------------------------- Tests ---------------------------------- */
