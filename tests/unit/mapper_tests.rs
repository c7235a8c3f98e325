/*!
 * Tests for timecode mapping
 */

use subresync::mapper::{map_timeline, unmapped_chunks, Mapper};
use subresync::resegment::{resegment, Chunk, DEFAULT_PUNCTUATION};
use subresync::timeline::{Interval, ReferenceTimeline, TimedSegment};

use crate::common;

fn intervals(chunks: Vec<Chunk>, reference: &ReferenceTimeline) -> Vec<Option<(u64, u64)>> {
    map_timeline(chunks, reference)
        .into_iter()
        .map(|m| m.interval.map(|iv| (iv.start, iv.end)))
        .collect()
}

/// Test the single-segment prefix case
#[test]
fn test_map_timeline_withPrefixChunk_shouldInterpolateEnd() {
    let reference = ReferenceTimeline::new(vec![TimedSegment::new(1, 0, 2000, "Hello world")]);
    assert_eq!(intervals(vec![Chunk::text("Hello")], &reference), vec![Some((0, 909))]);
}

/// Test the compact preset against the sample timeline
#[test]
fn test_map_timeline_withCompactChunks_shouldFollowReference() {
    let reference = ReferenceTimeline::new(common::sample_segments());
    let chunks = resegment(&common::sample_transcript(), 30, 20, true, &DEFAULT_PUNCTUATION);

    assert_eq!(
        intervals(chunks, &reference),
        vec![
            Some((120, 2818)),
            Some((2878, 6200)),
            Some((6400, 9333)),
            Some((9397, 11800)),
        ]
    );
}

/// Test the standard preset against the sample timeline
#[test]
fn test_map_timeline_withStandardChunks_shouldFollowReference() {
    let reference = ReferenceTimeline::new(common::sample_segments());
    let chunks = resegment(&common::sample_transcript(), 42, 30, true, &DEFAULT_PUNCTUATION);

    assert_eq!(
        intervals(chunks, &reference),
        vec![Some((120, 4381)), Some((4445, 9333)), Some((9397, 11800))]
    );
}

/// Test that chunks cut from the reference's own text all map in order
#[test]
fn test_map_timeline_withOwnText_shouldMapEveryChunkMonotonically() {
    let reference = ReferenceTimeline::new(common::sample_segments());
    for (max, min) in [(42, 30), (30, 20), (20, 10)] {
        let chunks = resegment(&reference.transcript(), max, min, true, &DEFAULT_PUNCTUATION);
        let mapped = map_timeline(chunks, &reference);

        assert!(unmapped_chunks(&mapped).is_empty(), "unmapped chunks at {}/{}", max, min);
        let starts: Vec<u64> = mapped.iter().filter_map(|m| m.interval).map(|iv| iv.start).collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]), "starts out of order at {}/{}", max, min);
    }
}

/// Test that a repeated phrase maps to successive occurrences
#[test]
fn test_map_chunk_withRepeatedPhrase_shouldAdvanceCursor() {
    let reference = ReferenceTimeline::new(vec![
        TimedSegment::new(1, 0, 1000, "Again."),
        TimedSegment::new(2, 1000, 2000, "And again."),
        TimedSegment::new(3, 2000, 3000, "Again."),
    ]);
    let mut mapper = Mapper::new(&reference);

    assert_eq!(mapper.map_chunk("Again."), Some(Interval::new(0, 1000)));
    assert_eq!(mapper.map_chunk("And again."), Some(Interval::new(1000, 2000)));
    assert_eq!(mapper.map_chunk("Again."), Some(Interval::new(2000, 3000)));
    assert_eq!(mapper.cursor(), 3000);
}

/// Test that unmapped chunks are reported and later chunks still map
#[test]
fn test_map_timeline_withForeignChunk_shouldReportAndContinue() {
    let reference = ReferenceTimeline::new(vec![
        TimedSegment::new(1, 0, 1000, "First line."),
        TimedSegment::new(2, 1000, 2000, "Second line."),
    ]);
    let mapped = map_timeline(
        vec![Chunk::text("First line."), Chunk::text("Nothing alike"), Chunk::text("Second line.")],
        &reference,
    );

    let unmapped = unmapped_chunks(&mapped);
    assert_eq!(unmapped.len(), 1);
    assert_eq!(unmapped[0].index, 2);
    assert_eq!(unmapped[0].text, "Nothing alike");
    assert_eq!(mapped[2].interval, Some(Interval::new(1000, 2000)));
}

/// Test that empty reference segments are skipped while walking
#[test]
fn test_map_chunk_acrossEmptySegment_shouldSkipIt() {
    let reference = ReferenceTimeline::new(vec![
        TimedSegment::new(1, 0, 1000, "one two"),
        TimedSegment::new(2, 1000, 1200, ""),
        TimedSegment::new(3, 1200, 2000, "three four"),
    ]);
    let mut mapper = Mapper::new(&reference);

    assert_eq!(mapper.map_chunk("one two three four"), Some(Interval::new(0, 2000)));
}

/// Test that stray spaces in reference text do not stop its own chunks from mapping
#[test]
fn test_map_timeline_withIrregularReferenceSpacing_shouldMapOwnText() {
    let reference = ReferenceTimeline::new(vec![
        TimedSegment::new(1, 0, 2000, "Over the last year, \nwe have witnessed"),
        TimedSegment::new(2, 2000, 4000, "what  is the greatest crime"),
    ]);
    let chunks = resegment(&reference.transcript(), 42, 30, true, &DEFAULT_PUNCTUATION);
    assert_eq!(
        chunks,
        vec![Chunk::text("Over the last year, we have witnessed what\nis the greatest crime")]
    );

    let mapped = map_timeline(chunks, &reference);

    assert!(unmapped_chunks(&mapped).is_empty());
    assert_eq!(mapped[0].interval, Some(Interval::new(0, 4000)));
}

/// Test that a stale match moves on to the next segment instead of trying
/// a later occurrence inside the same one
#[test]
fn test_map_chunk_withStaleMatchInSameSegment_shouldMoveToNextSegment() {
    let reference = ReferenceTimeline::new(vec![TimedSegment::new(1, 0, 3000, "Again. Stop. Again.")]);
    let mut mapper = Mapper::new(&reference);

    assert_eq!(mapper.map_chunk("Again.").map(|iv| iv.start), Some(0));
    assert!(mapper.map_chunk("Stop.").is_some());
    let cursor = mapper.cursor();

    assert_eq!(mapper.map_chunk("Again."), None);
    assert_eq!(mapper.cursor(), cursor);
}
