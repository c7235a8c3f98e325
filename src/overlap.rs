/*!
 * Overlap resolver for adjacent timed segments.
 *
 * Each overlapping pair is split at the midpoint of the overlap and pulled
 * apart by a buffer on each side. The pass reads the original values only,
 * so a segment that overlaps both neighbours is adjusted for each of them
 * independently. Overlaps between non-adjacent segments are not looked at;
 * [`crate::validation::check_sequence`] reports whatever is left.
 */

use log::debug;

use crate::timeline::TimedSegment;

/// Gap in ms left between two segments that overlapped
pub const DEFAULT_BUFFER_MS: u64 = 5;

/// Resolve overlaps between adjacent segments.
///
/// For every pair with `end_i > start_{i+1}`, with `shift` half the
/// overlap, `end_i` becomes `end_i - shift - buffer_ms` and `start_{i+1}`
/// becomes `start_{i+1} + shift + buffer_ms`. Pairs that do not overlap are
/// left alone, as are the first start and the last end.
pub fn resolve_overlaps(segments: &[TimedSegment], buffer_ms: u64) -> Vec<TimedSegment> {
    let mut resolved = segments.to_vec();
    let mut repaired = 0usize;

    for (i, pair) in segments.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        if current.end <= next.start {
            continue;
        }

        let shift = (current.end - next.start) / 2;
        resolved[i].end = current.end.saturating_sub(shift + buffer_ms);
        resolved[i + 1].start = next.start + shift + buffer_ms;
        repaired += 1;

        debug!(
            "Resolved overlap between #{} and #{}: end {} -> {}, start {} -> {}",
            current.sequence_index,
            next.sequence_index,
            current.end,
            resolved[i].end,
            next.start,
            resolved[i + 1].start
        );
    }

    if repaired > 0 {
        debug!("Resolved {} overlapping pair(s) with a {}ms buffer", repaired, buffer_ms);
    }

    resolved
}
