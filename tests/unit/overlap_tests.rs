/*!
 * Tests for overlap resolution and sequence checks
 */

use subresync::overlap::{resolve_overlaps, DEFAULT_BUFFER_MS};
use subresync::timeline::TimedSegment;
use subresync::validation::{check_sequence, SequenceIssue};

use crate::common;

fn segments(times: &[(u64, u64)]) -> Vec<TimedSegment> {
    times
        .iter()
        .enumerate()
        .map(|(i, (start, end))| TimedSegment::new(i + 1, *start, *end, "text"))
        .collect()
}

/// Test the documented midpoint example
#[test]
fn test_resolve_overlaps_withDefaultBuffer_shouldLeaveGap() {
    let resolved = resolve_overlaps(&segments(&[(1000, 3000), (2000, 4000)]), DEFAULT_BUFFER_MS);
    assert_eq!(common::times(&resolved), vec![(1000, 2495), (2505, 4000)]);
}

/// Test that no adjacent pair overlaps after resolution
#[test]
fn test_resolve_overlaps_withChainOfOverlaps_shouldClearAdjacentPairs() {
    let input = segments(&[(0, 1500), (1000, 2600), (2000, 3500), (3400, 5000), (6000, 7000)]);
    let resolved = resolve_overlaps(&input, 5);

    assert!(resolved.windows(2).all(|w| w[0].end <= w[1].start));
    assert!(check_sequence(&resolved).iter().all(|issue| !issue.is_overlap()));
    assert_eq!(resolved[0].start, 0);
    assert_eq!(resolved[4].end, 7000);
}

/// Test that the check finds what resolution repairs
#[test]
fn test_check_sequence_beforeAndAfterResolution_shouldClearOverlaps() {
    let input = segments(&[(0, 1000), (900, 2000), (2100, 3000)]);
    assert_eq!(
        check_sequence(&input),
        vec![SequenceIssue::Overlap { sequence_index: 1, next_index: 2, overlap_ms: 100 }]
    );
    assert!(check_sequence(&resolve_overlaps(&input, 5)).is_empty());
}

/// Test that the sample timeline is clean
#[test]
fn test_check_sequence_withSampleTimeline_shouldFindNothing() {
    assert!(check_sequence(&common::sample_segments()).is_empty());
}

/// Test that an odd overlap without buffer keeps one millisecond, which
/// the check reports
#[test]
fn test_resolve_overlaps_withOddOverlapAndNoBuffer_shouldLeaveOneMillisecond() {
    let resolved = resolve_overlaps(&segments(&[(0, 1001), (0, 2000)]), 0);
    assert_eq!(common::times(&resolved), vec![(0, 501), (500, 2000)]);

    // A second pass cannot move a one millisecond overlap
    assert_eq!(resolve_overlaps(&resolved, 0), resolved);
    assert_eq!(
        check_sequence(&resolved),
        vec![SequenceIssue::Overlap { sequence_index: 1, next_index: 2, overlap_ms: 1 }]
    );
}

/// Test that a segment squeezed by both neighbours is reported as inverted
#[test]
fn test_resolve_overlaps_withContainedSegment_shouldReportInversion() {
    let resolved = resolve_overlaps(&segments(&[(0, 3000), (500, 1000), (800, 4000)]), 0);
    assert_eq!(common::times(&resolved), vec![(0, 1750), (1750, 900), (900, 4000)]);

    let issues = check_sequence(&resolved);
    assert!(issues.contains(&SequenceIssue::InvertedRange { sequence_index: 2, start_ms: 1750, end_ms: 900 }));
}
