/*!
 * Turning a [`MatchKind`] into an interval.
 *
 * Containment inside one segment is pure ratio arithmetic. Anything that
 * crosses a segment boundary walks neighbouring segments, consuming whole
 * segments while they line up with the remaining text and finishing with a
 * ratio-duration inside the last segment touched.
 */

use crate::timecode::duration_ratio;
use crate::timeline::{Interval, ReferenceTimeline};

use super::matching::{MatchKind, Position, SpanDirection};

/// Interval for `chunk` matched against the segment at `index`, or `None`
/// when the match cannot be completed across its neighbours
pub fn resolve(
    reference: &ReferenceTimeline,
    index: usize,
    chunk: &str,
    kind: MatchKind,
) -> Option<Interval> {
    let segment = reference.get(index)?;
    let text = reference.text(index)?;
    let duration = segment.duration();

    match kind {
        MatchKind::Exact => Some(segment.interval()),

        MatchKind::ContainedInSegment { position, offset } => {
            let (start, end) = match position {
                Position::Start => (
                    segment.start,
                    segment.start + duration_ratio(duration, text, chunk),
                ),
                Position::End => (
                    segment.end.saturating_sub(duration_ratio(duration, text, chunk)),
                    segment.end,
                ),
                Position::Middle => {
                    let before = &text[..offset];
                    let after = &text[offset + chunk.len()..];
                    (
                        segment.start + duration_ratio(duration, text, before),
                        segment.end.saturating_sub(duration_ratio(duration, text, after)),
                    )
                }
            };
            Some(Interval::new(start, end))
        }

        MatchKind::SegmentInChunk { position, offset } => {
            let head = &chunk[..offset];
            let tail = &chunk[offset + text.len()..];
            let (start, end) = match position {
                Position::Start => (segment.start, walk_forward(reference, index, tail)?),
                Position::End => (walk_backward(reference, index, head)?, segment.end),
                Position::Middle => (
                    walk_backward(reference, index, head)?,
                    walk_forward(reference, index, tail)?,
                ),
            };
            Some(Interval::new(start, end))
        }

        MatchKind::PartialSpan { direction, split } => {
            let (head, tail) = chunk.split_at(split);
            let (start, end) = match direction {
                SpanDirection::Forward => (
                    segment.end.saturating_sub(duration_ratio(duration, text, head)),
                    walk_forward(reference, index, tail)?,
                ),
                SpanDirection::Backward => (
                    walk_backward(reference, index, head)?,
                    segment.start + duration_ratio(duration, text, tail),
                ),
            };
            Some(Interval::new(start, end))
        }
    }
}

/// End time of `remaining` text that continues past the segment at `index`
pub fn walk_forward(reference: &ReferenceTimeline, index: usize, remaining: &str) -> Option<u64> {
    let mut rest = remaining.trim();
    let mut end = reference.get(index)?.end;
    let mut next = index + 1;

    while !rest.is_empty() {
        let segment = reference.get(next)?;
        let text = reference.text(next)?;
        next += 1;

        if text.is_empty() {
            continue;
        }

        if let Some(after) = rest.strip_prefix(text) {
            rest = after.trim_start();
            end = segment.end;
            continue;
        }

        let offset = text.find(rest)?;
        let covered = &text[..offset + rest.len()];
        return Some(segment.start + duration_ratio(segment.duration(), text, covered));
    }

    Some(end)
}

/// Start time of `remaining` text that precedes the segment at `index`
pub fn walk_backward(reference: &ReferenceTimeline, index: usize, remaining: &str) -> Option<u64> {
    let mut rest = remaining.trim();
    let mut start = reference.get(index)?.start;
    let mut prev = index;

    while !rest.is_empty() {
        prev = prev.checked_sub(1)?;
        let segment = reference.get(prev)?;
        let text = reference.text(prev)?;

        if text.is_empty() {
            continue;
        }

        if let Some(before) = rest.strip_suffix(text) {
            rest = before.trim_end();
            start = segment.start;
            continue;
        }

        let offset = text.rfind(rest)?;
        let covered = &text[offset..];
        return Some(
            segment
                .end
                .saturating_sub(duration_ratio(segment.duration(), text, covered)),
        );
    }

    Some(start)
}
