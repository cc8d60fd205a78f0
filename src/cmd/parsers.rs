//! Argument coercions used as clap value parsers. Rejections are `User`
//! errors so the dispatcher reports them like any other command failure.

use crate::dispatch::CommandError;

/// Year of the first world championship race.
pub const FIRST_SEASON: u16 = 1950;

pub const FUTURE_SEASON: &str = "That year hasn't happened yet.";

/// Season year of 1950 or later. The upper bound depends on the clock, so
/// commands finish the check with `Services::season`.
pub fn parse_year(s: &str) -> Result<u16, CommandError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommandError::user(format!("Could not parse {s} as a year.")));
    }
    // Digits only, so a failed parse is an overflow.
    let year: i64 = trimmed.parse().unwrap_or(i64::MAX);
    if year < i64::from(FIRST_SEASON) {
        return Err(CommandError::user("F1's first race was in 1950."));
    }
    u16::try_from(year).map_err(|_| CommandError::user(FUTURE_SEASON))
}
