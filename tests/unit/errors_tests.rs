/*!
 * Tests for error types and conversions
 */

use subcue::errors::{AppError, ConfigError, SubtitleError};

#[test]
fn test_subtitleError_recordMalformed_shouldDisplayLineAndReason() {
    let error = SubtitleError::RecordMalformed {
        line: 12,
        reason: "end before start".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("line 12"));
    assert!(display.contains("end before start"));
}

#[test]
fn test_subtitleError_indexOutOfRange_shouldDisplayIndexAndLength() {
    let display = SubtitleError::IndexOutOfRange { index: 7, len: 3 }.to_string();
    assert!(display.contains('7'));
    assert!(display.contains('3'));
}

#[test]
fn test_configError_invalidValue_shouldNameField() {
    let error = ConfigError::InvalidValue {
        field: "fallback_slot_ms",
        reason: "too short".to_string(),
    };
    assert!(error.to_string().contains("fallback_slot_ms"));
}

#[test]
fn test_appError_fromSubtitleError_shouldWrap() {
    let error: AppError = SubtitleError::NoActiveCue.into();
    assert!(matches!(error, AppError::Subtitle(SubtitleError::NoActiveCue)));
    assert!(error.to_string().contains("No active cue"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(ref msg) if msg.contains("gone")));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(error, AppError::Unknown(ref msg) if msg == "boom"));
}
