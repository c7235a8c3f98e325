/*!
 * Tests for error types
 */

use subresync::errors::{AppError, SyncError, TimecodeError, UnmappedChunkError};

/// Test that the unmapped diagnostic lists every chunk
#[test]
fn test_sync_error_withUnmappedChunks_shouldListText() {
    let error = SyncError::Unmapped(vec![
        UnmappedChunkError { index: 2, text: "first lost".to_string() },
        UnmappedChunkError { index: 5, text: "second lost".to_string() },
    ]);
    let message = error.to_string();

    assert!(message.starts_with("2 chunk(s)"));
    assert!(message.contains("chunk 2 has no admissible interval: \"first lost\""));
    assert!(message.contains("chunk 5 has no admissible interval: \"second lost\""));
}

/// Test conversions into the application error
#[test]
fn test_app_error_fromInnerErrors_shouldWrap() {
    let error: AppError = TimecodeError::Format("x".to_string()).into();
    assert!(matches!(error, AppError::Timecode(_)));

    let error: AppError = SyncError::InvalidLimits { min: 3, max: 2 }.into();
    assert_eq!(
        error.to_string(),
        "Sync error: Invalid line limits: min_chars 3 exceeds max_chars 2"
    );

    let error: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(error, AppError::File(_)));
}

/// Test that a bad time code in a timeline file surfaces as a timecode error
#[test]
fn test_load_segments_withBadTimeCode_shouldKeepTimecodeErrorAsSource() -> anyhow::Result<()> {
    let temp_dir = crate::common::create_temp_dir()?;
    let path = crate::common::create_test_file(
        temp_dir.path(),
        "bad.json",
        r#"{"entries": [{"block_number": 1, "time_code": "00:00:01,000", "text": "x"}]}"#,
    )?;

    let error = subresync::timeline_file::load_segments(&path).unwrap_err();

    assert!(matches!(error.downcast_ref::<TimecodeError>(), Some(TimecodeError::Range(_))));
    Ok(())
}
