/*!
 * Tests for transcript re-wrapping
 */

use subresync::app_config::{LinePreset, SyncConfig};
use subresync::resegment::{resegment, Chunk, Resegmenter, DEFAULT_PUNCTUATION};

use crate::common;

fn visible(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Test the compact preset on the sample transcript
#[test]
fn test_resegment_withCompactPreset_shouldBuildExpectedChunks() {
    let chunks = resegment(&common::sample_transcript(), 30, 20, true, &DEFAULT_PUNCTUATION);

    assert_eq!(
        chunks,
        vec![
            Chunk::text("Over the last year, we have\nwitnessed what is the greatest"),
            Chunk::text("crime of the 21st century,\nbroadcast live to the world."),
            Chunk::text("Newsrooms had a choice to\nmake. Some of them chose"),
            Chunk::text("silence. Others chose to look\naway."),
        ]
    );
}

/// Test that no line exceeds the limit when whitespace is available
#[test]
fn test_resegment_withWordText_shouldRespectMaxChars() {
    for (max, min) in [(42, 30), (30, 20), (20, 10)] {
        let chunks = resegment(&common::sample_transcript(), max, min, true, &DEFAULT_PUNCTUATION);
        for chunk in &chunks {
            assert!(chunk.lines().count() <= 2);
            for line in chunk.lines() {
                assert!(line.chars().count() <= max, "line {:?} exceeds {}", line, max);
            }
        }
    }
}

/// Test that characters are neither lost nor duplicated
#[test]
fn test_resegment_withAnyLimits_shouldPreserveCharacters() {
    let transcript = common::sample_transcript();
    for (max, min) in [(42, 30), (30, 20), (12, 4), (5, 0)] {
        let chunks = resegment(&transcript, max, min, true, &DEFAULT_PUNCTUATION);
        let rebuilt: String = chunks.iter().map(|c| visible(&c.text)).collect();
        assert_eq!(rebuilt, visible(&transcript));
    }
}

/// Test that a pinned break splits the transcript
#[test]
fn test_resegment_withMarker_shouldPinBoundary() {
    let chunks = resegment("Hello there. ## General Kenobi.", 42, 30, true, &DEFAULT_PUNCTUATION);
    assert_eq!(
        chunks,
        vec![Chunk::text("Hello there."), Chunk::marker(), Chunk::text("General Kenobi.")]
    );
}

/// Test that config drives the resegmenter
#[test]
fn test_from_config_withCompactPreset_shouldUseItsLimits() {
    let config = SyncConfig {
        preset: LinePreset::Compact,
        ..SyncConfig::default()
    };
    let resegmenter = Resegmenter::from_config(&config);
    assert_eq!(resegmenter.max_chars(), 30);
    assert_eq!(resegmenter.min_chars(), 20);
}
