/*!
 * Sequence checks for timed segments.
 *
 * This module reports what keeps a timeline from being a clean, ordered
 * sequence:
 * - Ranges that end before they start
 * - Adjacent segments that overlap
 * - Segments that start before their predecessor
 * - Block numbers that do not count up from 1
 */

use log::debug;

use crate::timeline::TimedSegment;

/// Types of sequence issues
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceIssue {
    /// Start time is after end time within one segment
    InvertedRange {
        sequence_index: usize,
        start_ms: u64,
        end_ms: u64,
    },
    /// The segment ends after the next one starts
    Overlap {
        sequence_index: usize,
        next_index: usize,
        overlap_ms: u64,
    },
    /// The segment starts before the previous one
    OutOfOrder {
        sequence_index: usize,
        start_ms: u64,
        previous_start_ms: u64,
    },
    /// Block number differs from the segment's position
    Misnumbered { position: usize, found: usize },
}

impl SequenceIssue {
    /// Whether resolving overlaps can repair this issue
    pub fn is_overlap(&self) -> bool {
        matches!(self, SequenceIssue::Overlap { .. })
    }
}

impl std::fmt::Display for SequenceIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceIssue::InvertedRange { sequence_index, start_ms, end_ms } => {
                write!(
                    f,
                    "Block {}: start {}ms is after end {}ms",
                    sequence_index, start_ms, end_ms
                )
            }
            SequenceIssue::Overlap { sequence_index, next_index, overlap_ms } => {
                write!(
                    f,
                    "Block {} overlaps block {} by {}ms",
                    sequence_index, next_index, overlap_ms
                )
            }
            SequenceIssue::OutOfOrder { sequence_index, start_ms, previous_start_ms } => {
                write!(
                    f,
                    "Block {} starts at {}ms, before the previous block at {}ms",
                    sequence_index, start_ms, previous_start_ms
                )
            }
            SequenceIssue::Misnumbered { position, found } => {
                write!(f, "Block index {} is wrong or missing (found {})", position, found)
            }
        }
    }
}

/// Check `segments` in their given order
pub fn check_sequence(segments: &[TimedSegment]) -> Vec<SequenceIssue> {
    let mut issues = Vec::new();

    for (i, segment) in segments.iter().enumerate() {
        if segment.sequence_index != i + 1 {
            issues.push(SequenceIssue::Misnumbered {
                position: i + 1,
                found: segment.sequence_index,
            });
        }

        if segment.start > segment.end {
            issues.push(SequenceIssue::InvertedRange {
                sequence_index: segment.sequence_index,
                start_ms: segment.start,
                end_ms: segment.end,
            });
        }
    }

    for pair in segments.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);

        if next.start < current.start {
            issues.push(SequenceIssue::OutOfOrder {
                sequence_index: next.sequence_index,
                start_ms: next.start,
                previous_start_ms: current.start,
            });
        }

        if current.end > next.start {
            issues.push(SequenceIssue::Overlap {
                sequence_index: current.sequence_index,
                next_index: next.sequence_index,
                overlap_ms: current.end - next.start,
            });
        }
    }

    debug!(
        "Sequence check: {} segments, {} issues",
        segments.len(),
        issues.len()
    );

    issues
}
