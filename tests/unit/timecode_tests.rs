/*!
 * Tests for timestamp parsing and formatting
 */

use subcue::errors::SubtitleError;
use subcue::timecode::{format_clock, format_srt_timestamp, ms_to_seconds, parse_timestamp, seconds_to_ms};

#[test]
fn test_parseTimestamp_withSurroundingWhitespace_shouldTrim() {
    assert_eq!(parse_timestamp("  00:00:01,000 "), Ok(1_000));
}

#[test]
fn test_parseTimestamp_withLongFraction_shouldKeepMilliseconds() {
    assert_eq!(parse_timestamp("00:00:01.123456"), Ok(1_123));
}

#[test]
fn test_parseTimestamp_withInvalidToken_shouldNameIt() {
    assert_eq!(
        parse_timestamp("12-34-56"),
        Err(SubtitleError::InvalidTimestamp("12-34-56".to_string()))
    );
}

#[test]
fn test_formatClock_shouldParseBack() {
    for ms in [0, 999, 5_000, 3_723_456] {
        assert_eq!(parse_timestamp(&format_clock(ms)), Ok(ms));
    }
    assert_eq!(format_clock(3_723_456), "1:02:03.456");
}

#[test]
fn test_formatSrtTimestamp_withHours_shouldPadFields() {
    assert_eq!(format_srt_timestamp(0), "00:00:00,000");
    assert_eq!(format_srt_timestamp(36_000_001), "10:00:00,001");
}

#[test]
fn test_secondsToMs_withFractionalSeconds_shouldRound() {
    assert_eq!(seconds_to_ms(92.5), 92_500);
    assert_eq!(seconds_to_ms(0.0004), 0);
    assert_eq!(seconds_to_ms(0.0006), 1);
    assert_eq!(ms_to_seconds(92_500), 92.5);
}
