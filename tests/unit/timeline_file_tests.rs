/*!
 * Tests for timeline JSON files
 */

use anyhow::Result;
use subresync::timeline_file::{load_segments, save_segments, TimelineDocument};

use crate::common;

/// Test that segments survive a save and load
#[test]
fn test_save_segments_thenLoad_shouldKeepTimesAndText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("talk.json");

    save_segments(&path, &common::sample_segments())?;
    let loaded = load_segments(&path)?;

    assert_eq!(loaded, common::sample_segments());
    Ok(())
}

/// Test that the written document carries stats
#[test]
fn test_save_segments_shouldWriteAdditionalInfo() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_timeline(temp_dir.path(), "talk.json")?;

    let document = TimelineDocument::load(&path)?;
    let info = document.additional_info.expect("stats should be written");
    assert_eq!(info["total_blocks"], 6);
    assert_eq!(document.entries[0].time_code, "00:00:00,120 --> 00:00:01,640");

    Ok(())
}

/// Test that an invalid file reports its path
#[test]
fn test_load_segments_withBrokenJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    let error = load_segments(&path).unwrap_err();
    assert!(format!("{:#}", error).contains("broken.json"));

    Ok(())
}

/// Test that a document without entries loads as empty
#[test]
fn test_from_json_withoutEntries_shouldBeEmpty() -> Result<()> {
    let document = TimelineDocument::from_json("{}")?;
    assert!(document.to_segments()?.is_empty());
    Ok(())
}
