/*!
 * Time codec for subtitle timecodes.
 *
 * Converts between the `HH:MM:SS,mmm` representation and integer
 * milliseconds, and derives durations from character counts.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TimecodeError;

// @const: Single timecode, hours unbounded
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2}),(\d{3})$").expect("Invalid timecode regex")
});

// @const: Timecode range separator
pub const RANGE_SEPARATOR: &str = "-->";

/// Parse a `HH:MM:SS,mmm` timecode into milliseconds
pub fn parse_timecode(timecode: &str) -> Result<u64, TimecodeError> {
    let trimmed = timecode.trim();
    let caps = TIMECODE_REGEX
        .captures(trimmed)
        .ok_or_else(|| TimecodeError::Format(timecode.to_string()))?;

    let field = |idx: usize| -> Result<u64, TimecodeError> {
        caps[idx]
            .parse::<u64>()
            .map_err(|_| TimecodeError::Format(timecode.to_string()))
    };

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    let millis = field(4)?;

    if minutes >= 60 || seconds >= 60 {
        return Err(TimecodeError::OutOfRange(timecode.to_string()));
    }

    hours
        .checked_mul(3_600_000)
        .and_then(|h| h.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
        .ok_or_else(|| TimecodeError::OutOfRange(timecode.to_string()))
}

/// Format milliseconds as `HH:MM:SS,mmm`. Hours do not wrap at 24.
pub fn format_timecode(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Format a signed millisecond count, rejecting negative values
pub fn format_signed_timecode(ms: i64) -> Result<String, TimecodeError> {
    u64::try_from(ms)
        .map(format_timecode)
        .map_err(|_| TimecodeError::Negative(ms))
}

/// Parse `HH:MM:SS,mmm --> HH:MM:SS,mmm` into a `(start, end)` pair
pub fn parse_time_range(range: &str) -> Result<(u64, u64), TimecodeError> {
    let (start, end) = range
        .split_once(RANGE_SEPARATOR)
        .ok_or_else(|| TimecodeError::Range(range.to_string()))?;

    Ok((parse_timecode(start)?, parse_timecode(end)?))
}

/// Format a `(start, end)` pair as `HH:MM:SS,mmm --> HH:MM:SS,mmm`
pub fn format_time_range(start: u64, end: u64) -> String {
    format!(
        "{} {} {}",
        format_timecode(start),
        RANGE_SEPARATOR,
        format_timecode(end)
    )
}

/// Share of `total_ms` that `sub_text` takes up in `full_text`, by
/// character count, rounded down.
///
/// Assumes narration speed is uniform within one segment. An empty
/// `full_text` yields 0.
pub fn duration_ratio(total_ms: u64, full_text: &str, sub_text: &str) -> u64 {
    let full_len = full_text.chars().count() as u64;
    if full_len == 0 {
        return 0;
    }
    let sub_len = sub_text.chars().count() as u64;

    sub_len * total_ms / full_len
}
