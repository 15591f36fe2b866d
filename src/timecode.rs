/*!
 * Timestamp conversion between subtitle notations and integer milliseconds.
 *
 * Accepts `H:MM:SS`, `H:MM:SS,mmm`, `H:MM:SS.cc` and `MM:SS.mmm` tokens. The
 * fractional part is read as a decimal fraction of a second, so `.5`, `.50`
 * and `.500` all mean 500ms.
 */

use crate::errors::SubtitleError;

/// Parse a subtitle timestamp token into milliseconds
pub fn parse_timestamp(token: &str) -> Result<u64, SubtitleError> {
    let token = token.trim();
    let invalid = || SubtitleError::InvalidTimestamp(token.to_string());

    let (clock, fraction) = match token.find([',', '.']) {
        Some(pos) => (&token[..pos], &token[pos + 1..]),
        None => (token, ""),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (parse_component(h), parse_component(m), parse_component(s)),
        [m, s] => (Some(0), parse_component(m), parse_component(s)),
        _ => return Err(invalid()),
    };

    let (hours, minutes, seconds) = match (hours, minutes, seconds) {
        (Some(h), Some(m), Some(s)) => (h, m, s),
        _ => return Err(invalid()),
    };

    let millis = parse_fraction(fraction).ok_or_else(invalid)?;

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes.checked_mul(60)?))
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(invalid)
}

fn parse_component(part: &str) -> Option<u64> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn parse_fraction(fraction: &str) -> Option<u64> {
    let fraction = fraction.trim();
    if fraction.is_empty() {
        return Some(0);
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut millis = 0;
    let mut scale = 100;
    for digit in fraction.bytes().take(3) {
        millis += u64::from(digit - b'0') * scale;
        scale /= 10;
    }
    Some(millis)
}

/// Format milliseconds as an SRT timestamp (HH:MM:SS,mmm)
pub fn format_srt_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Format milliseconds as an ASS-style clock (H:MM:SS.mmm) for synthesized records
pub fn format_clock(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Convert playback-clock seconds to milliseconds; negative and non-finite values clamp to 0
pub fn seconds_to_ms(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0).round() as u64
}

/// Convert milliseconds to seconds for seek commands
pub fn ms_to_seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
