/*!
Ergast-shaped season data and the sources that provide it.

  Dataset ─ races: [Race]
              Race ─ schedule (date, time, practice / qualifying / sprint)
                   ├ results            (race classification)
                   ├ qualifying_results
                   ├ driver_standings       championship after this round
                   └ constructor_standings

Sources:
  - `FileSource`   JSON or YAML dataset on disk (see file.rs)
  - `MemorySource` in-memory dataset
  - `Unconfigured` every call fails with a hint to configure a dataset

Query helpers shared by the domain commands live in `queries`.
*/

pub mod file;
pub mod queries;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::dispatch::CommandError;

pub use file::FileSource;

/* -------------------------------------------------------------------------- */
/* Model                                                                      */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub races: Vec<Race>,
}

impl Dataset {
    /// Races of one season ordered by round.
    pub fn season(&self, year: u16) -> Vec<Race> {
        let mut races: Vec<Race> = self
            .races
            .iter()
            .filter(|r| r.year == year)
            .cloned()
            .collect();
        races.sort_by_key(|r| r.round);
        races
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub year: u16,
    pub round: u32,
    pub name: String,
    pub circuit: String,
    pub location: String,
    pub date: NaiveDate,
    /// Race start (UTC); unknown for many historical rounds.
    #[serde(default)]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub fp1: Option<NaiveDateTime>,
    #[serde(default)]
    pub fp2: Option<NaiveDateTime>,
    #[serde(default)]
    pub fp3: Option<NaiveDateTime>,
    #[serde(default)]
    pub qualifying: Option<NaiveDateTime>,
    #[serde(default)]
    pub sprint: Option<NaiveDateTime>,
    #[serde(default)]
    pub results: Vec<RaceResult>,
    #[serde(default)]
    pub qualifying_results: Vec<QualifyingResult>,
    #[serde(default)]
    pub driver_standings: Vec<StandingsRow>,
    #[serde(default)]
    pub constructor_standings: Vec<StandingsRow>,
}

impl Race {
    /// Race start; midnight when the start time is unknown.
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }

    /// Every scheduled session of the weekend in chronological order.
    pub fn sessions(&self) -> Vec<(&'static str, NaiveDateTime)> {
        let mut sessions: Vec<(&'static str, NaiveDateTime)> = [
            ("Practice 1", self.fp1),
            ("Practice 2", self.fp2),
            ("Practice 3", self.fp3),
            ("Qualifying", self.qualifying),
            ("Sprint", self.sprint),
            ("Race", Some(self.start())),
        ]
        .into_iter()
        .filter_map(|(name, at)| at.map(|at| (name, at)))
        .collect();
        sessions.sort_by_key(|&(_, at)| at);
        sessions
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    /// `None` for unclassified finishers.
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub number: Option<u32>,
    pub driver: String,
    #[serde(default)]
    pub time: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifyingResult {
    pub position: u32,
    #[serde(default)]
    pub number: Option<u32>,
    pub driver: String,
    #[serde(default)]
    pub q1: Option<String>,
    #[serde(default)]
    pub q2: Option<String>,
    #[serde(default)]
    pub q3: Option<String>,
}

/// One line of a championship table (driver or constructor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub position: u32,
    pub name: String,
    pub points: f64,
}

/* -------------------------------------------------------------------------- */
/* Sources                                                                    */
/* -------------------------------------------------------------------------- */

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("no dataset configured (pass --data PATH or set F1BOT_DATA)")]
    Unconfigured,
    #[error("failed to read dataset {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset {path}: {message}")]
    Parse { path: String, message: String },
}

impl From<DataError> for CommandError {
    fn from(err: DataError) -> Self {
        CommandError::Internal(anyhow::Error::new(err))
    }
}

/// Read-only access to season data. Shared across commands behind an `Arc`.
pub trait ErgastSource: Send + Sync {
    /// Every race of `year`, ordered by round. Empty when the season is unknown.
    fn races(&self, year: u16) -> Result<Vec<Race>, DataError>;
}

/// In-memory dataset, for tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    dataset: Dataset,
}

#[cfg(test)]
impl MemorySource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

#[cfg(test)]
impl ErgastSource for MemorySource {
    fn races(&self, year: u16) -> Result<Vec<Race>, DataError> {
        Ok(self.dataset.season(year))
    }
}

/// Stand-in used when no dataset was configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl ErgastSource for Unconfigured {
    fn races(&self, _: u16) -> Result<Vec<Race>, DataError> {
        Err(DataError::Unconfigured)
    }
}
