/*!
Season queries shared by the domain commands. Each returns either data ready
to render or a `CommandError` whose kind is already decided:
lookups the user can fix are `User`, source failures are `Internal`.
*/

use chrono::NaiveDateTime;

use super::{ErgastSource, QualifyingResult, Race, RaceResult, StandingsRow};
use crate::dispatch::{Cell, CommandError, Table};

/// First season with a constructors' championship.
pub const FIRST_CONSTRUCTORS_SEASON: u16 = 1958;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Championship {
    Drivers,
    Constructors,
}

pub fn season(source: &dyn ErgastSource, year: u16) -> Result<Vec<Race>, CommandError> {
    Ok(source.races(year)?)
}

/// Season calendar: Name, Round, Circuit, Location, Date.
pub fn schedule(source: &dyn ErgastSource, year: u16) -> Result<Table, CommandError> {
    let races = season(source, year)?;
    if races.is_empty() {
        return Err(CommandError::user(format!("No races found for {year}.")));
    }
    let table = Table::new(["Name", "Round", "Circuit", "Location", "Date"])?.with_rows(
        races.iter().map(|r| {
            vec![
                Cell::from(r.name.as_str()),
                Cell::from(r.round),
                Cell::from(r.circuit.as_str()),
                Cell::from(r.location.as_str()),
                Cell::from(r.date.format(DATE_FORMAT).to_string()),
            ]
        }),
    )?;
    Ok(table)
}

/// Highest round of the season that carries championship standings.
pub fn last_race_of_year(source: &dyn ErgastSource, year: u16) -> Result<Race, CommandError> {
    season(source, year)?
        .into_iter()
        .rev()
        .find(|r| !r.driver_standings.is_empty() || !r.constructor_standings.is_empty())
        .ok_or_else(|| {
            CommandError::user(format!(
                "Failed to find the last race of the year for {year}."
            ))
        })
}

/// Championship table after the last round: Position, Name, Points.
pub fn standings(
    source: &dyn ErgastSource,
    championship: Championship,
    year: u16,
) -> Result<Table, CommandError> {
    if championship == Championship::Constructors && year < FIRST_CONSTRUCTORS_SEASON {
        return Err(CommandError::user(format!(
            "The constructors' championship started in {FIRST_CONSTRUCTORS_SEASON}."
        )));
    }
    let race = last_race_of_year(source, year)?;
    let rows = match championship {
        Championship::Drivers => race.driver_standings,
        Championship::Constructors => race.constructor_standings,
    };
    standings_table(rows)
}

fn standings_table(mut rows: Vec<StandingsRow>) -> Result<Table, CommandError> {
    rows.sort_by_key(|r| r.position);
    let table = Table::new(["Position", "Name", "Points"])?.with_rows(
        rows.into_iter()
            .map(|r| vec![Cell::from(r.position), Cell::from(r.name), Cell::from(r.points)]),
    )?;
    Ok(table)
}

/// Resolve a free-text race reference within one season.
///
/// Case-insensitive substring match on the race name first, then on the
/// circuit name; each is accepted only when exactly one race matches.
pub fn resolve_race(
    source: &dyn ErgastSource,
    year: u16,
    query: &str,
) -> Result<Race, CommandError> {
    let races = season(source, year)?;
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(CommandError::user("Give part of a race or circuit name."));
    }

    let by_name = matching(&races, &needle, |r| &r.name);
    if let [only] = by_name.as_slice() {
        return Ok((*only).clone());
    }
    let by_circuit = matching(&races, &needle, |r| &r.circuit);
    if let [only] = by_circuit.as_slice() {
        return Ok((*only).clone());
    }

    let candidates = if by_name.len() > 1 { by_name } else { by_circuit };
    if candidates.is_empty() {
        return Err(CommandError::user(format!(
            "No race matching '{query}' in {year}."
        )));
    }
    let names: Vec<&str> = candidates.iter().map(|r| r.name.as_str()).collect();
    Err(CommandError::user(format!(
        "'{query}' matches more than one race in {year}: {}.",
        names.join(", ")
    )))
}

fn matching<'a>(races: &'a [Race], needle: &str, field: fn(&Race) -> &String) -> Vec<&'a Race> {
    races
        .iter()
        .filter(|r| field(r).to_lowercase().contains(needle))
        .collect()
}

/// Race classification: Position, Number, Driver, Time, Status.
pub fn race_results(race: &Race) -> Result<Table, CommandError> {
    let table = Table::new(["Position", "Number", "Driver", "Time", "Status"])?.with_rows(
        sorted_results(&race.results).into_iter().map(|r| {
            vec![
                Cell::from(r.position),
                Cell::from(r.number),
                Cell::from(r.driver.as_str()),
                Cell::from(r.time.clone()),
                Cell::from(r.status.as_str()),
            ]
        }),
    )?;
    Ok(table)
}

/// Classified finishers by position, unclassified ones after them in input order.
fn sorted_results(results: &[RaceResult]) -> Vec<&RaceResult> {
    let mut sorted: Vec<&RaceResult> = results.iter().collect();
    sorted.sort_by_key(|r| r.position.unwrap_or(u32::MAX));
    sorted
}

/// Qualifying classification: Position, Number, Driver, Q1, Q2, Q3.
pub fn qualifying_results(race: &Race) -> Result<Table, CommandError> {
    let mut rows: Vec<&QualifyingResult> = race.qualifying_results.iter().collect();
    rows.sort_by_key(|r| r.position);
    let table = Table::new(["Position", "Number", "Driver", "Q1", "Q2", "Q3"])?.with_rows(
        rows.into_iter().map(|r| {
            vec![
                Cell::from(r.position),
                Cell::from(r.number),
                Cell::from(r.driver.as_str()),
                Cell::from(r.q1.clone()),
                Cell::from(r.q2.clone()),
                Cell::from(r.q3.clone()),
            ]
        }),
    )?;
    Ok(table)
}

/// First race (by round) that starts at or after `now`.
pub fn next_race(races: &[Race], now: NaiveDateTime) -> Option<&Race> {
    races.iter().find(|r| r.start() >= now)
}

/// Session, Date, Time (UTC) for every scheduled session of the weekend.
pub fn weekend_sessions(race: &Race) -> Result<Table, CommandError> {
    let table = Table::new(["Session", "Date", "Time (UTC)"])?.with_rows(
        race.sessions().into_iter().map(|(name, at)| {
            vec![
                Cell::from(name),
                Cell::from(at.format(DATE_FORMAT).to_string()),
                Cell::from(at.format(TIME_FORMAT).to_string()),
            ]
        }),
    )?;
    Ok(table)
}
