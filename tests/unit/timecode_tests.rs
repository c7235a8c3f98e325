/*!
 * Tests for the time codec
 */

use subresync::errors::TimecodeError;
use subresync::timecode::{
    duration_ratio, format_signed_timecode, format_time_range, format_timecode, parse_time_range,
    parse_timecode,
};

/// Test that formatting pads every field
#[test]
fn test_format_timecode_withMixedFields_shouldZeroPad() {
    assert_eq!(format_timecode(3_725_003), "01:02:05,003");
    assert_eq!(format_timecode(0), "00:00:00,000");
}

/// Test that hours are not wrapped at a day
#[test]
fn test_format_timecode_withLongDuration_shouldKeepHours() {
    assert_eq!(format_timecode(100 * 3_600_000 + 1), "100:00:00,001");
    assert_eq!(parse_timecode("100:00:00,001").unwrap(), 100 * 3_600_000 + 1);
}

/// Test that parse inverts format over a spread of values
#[test]
fn test_parse_timecode_withFormattedValues_shouldRoundTrip() {
    for ms in [0u64, 1, 999, 1_000, 59_999, 60_000, 3_599_999, 3_600_000, 86_399_999] {
        assert_eq!(parse_timecode(&format_timecode(ms)).unwrap(), ms);
    }
}

/// Test that malformed input is a format error
#[test]
fn test_parse_timecode_withBadSeparators_shouldFail() {
    for input in ["00:00:01.000", "00-00-01,000", "aa:00:01,000", "", "00:00:01,0000"] {
        assert!(
            matches!(parse_timecode(input), Err(TimecodeError::Format(_))),
            "expected format error for {:?}",
            input
        );
    }
}

/// Test that a negative signed value is rejected
#[test]
fn test_format_signed_timecode_withNegative_shouldFail() {
    assert_eq!(format_signed_timecode(-5), Err(TimecodeError::Negative(-5)));
    assert_eq!(format_signed_timecode(1_500).unwrap(), "00:00:01,500");
}

/// Test the range helpers used by timeline files
#[test]
fn test_time_range_withArrow_shouldRoundTrip() {
    let range = format_time_range(120, 1_640);
    assert_eq!(range, "00:00:00,120 --> 00:00:01,640");
    assert_eq!(parse_time_range(&range).unwrap(), (120, 1_640));
}

/// Test the character-count ratio
#[test]
fn test_duration_ratio_withPrefix_shouldFloor() {
    assert_eq!(duration_ratio(2_000, "Hello world", "Hello"), 909);
    assert_eq!(duration_ratio(2_000, "", "Hello"), 0);
    assert_eq!(duration_ratio(2_000, "Hello world", ""), 0);
}
