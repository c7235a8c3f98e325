/*!
 * Timed segment model and the reference timeline.
 *
 * A reference timeline is the trusted, time-stamped original text. It is
 * read-only for the duration of a mapping run; the mapper only ever looks
 * at the normalized text cached here.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::timecode::format_time_range;

// @struct: One timed unit of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedSegment {
    // @field: 1-based position in its sequence
    pub sequence_index: usize,

    // @field: Start time in ms
    pub start: u64,

    // @field: End time in ms
    pub end: u64,

    // @field: Display text, may hold one line break
    pub text: String,
}

impl TimedSegment {
    /// Creates a new timed segment
    pub fn new(sequence_index: usize, start: u64, end: u64, text: impl Into<String>) -> Self {
        TimedSegment {
            sequence_index,
            start,
            end,
            text: text.into(),
        }
    }

    /// Duration in ms, 0 for inverted ranges
    pub fn duration(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// The segment's `(start, end)` pair
    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }

    /// Text with whitespace runs collapsed to single spaces and trimmed
    pub fn normalized_text(&self) -> String {
        normalize_text(&self.text)
    }
}

impl fmt::Display for TimedSegment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "#{} [{}] {}",
            self.sequence_index,
            format_time_range(self.start, self.end),
            normalize_text(&self.text)
        )
    }
}

/// A resolved `(start, end)` pair in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: u64,
    pub end: u64,
}

impl Interval {
    /// Build an interval, pulling `start` back to `end` if it lies after it
    pub fn new(start: u64, end: u64) -> Self {
        Interval {
            start: start.min(end),
            end,
        }
    }

    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format_time_range(self.start, self.end))
    }
}

/// Collapse every whitespace run, line breaks included, to one space and
/// trim. Chunks and reference segments both go through this, so a chunk cut
/// from a segment's own text is always a substring of it.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim every line of `text` and drop the lines left empty. Line breaks
/// between the remaining lines are kept.
pub fn clean_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Copies of `segments` with [`clean_text`] applied to their text
pub fn clean_segments(segments: &[TimedSegment]) -> Vec<TimedSegment> {
    segments
        .iter()
        .map(|segment| TimedSegment {
            text: clean_text(&segment.text),
            ..segment.clone()
        })
        .collect()
}

/// Aggregate figures for a timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineStats {
    /// Sum of segment durations in ms
    pub total_duration_ms: u64,
    /// Non-whitespace characters across all segments
    pub total_characters: usize,
    /// Characters per second over the summed duration
    pub average_characters_per_second: f64,
    /// Number of segments
    pub total_blocks: usize,
}

/// Ordered, read-only sequence of reference segments
#[derive(Debug, Clone, Default)]
pub struct ReferenceTimeline {
    segments: Vec<TimedSegment>,
    normalized: Vec<String>,
    weights: Vec<f64>,
}

impl ReferenceTimeline {
    /// Build a timeline from segments in their given order
    pub fn new(segments: Vec<TimedSegment>) -> Self {
        let normalized = segments.iter().map(TimedSegment::normalized_text).collect();
        let weights = character_weights(&segments);

        ReferenceTimeline {
            segments,
            normalized,
            weights,
        }
    }

    /// Build a timeline after a stable sort by start time, renumbering
    /// `sequence_index` from 1
    pub fn sorted(mut segments: Vec<TimedSegment>) -> Self {
        segments.sort_by_key(|s| s.start);
        for (i, segment) in segments.iter_mut().enumerate() {
            segment.sequence_index = i + 1;
        }
        Self::new(segments)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[TimedSegment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&TimedSegment> {
        self.segments.get(index)
    }

    /// Normalized text of the segment at `index`
    pub fn text(&self, index: usize) -> Option<&str> {
        self.normalized.get(index).map(String::as_str)
    }

    /// Share (0-100) of the timeline's non-whitespace characters held by
    /// the segment at `index`
    pub fn character_weight(&self, index: usize) -> Option<f64> {
        self.weights.get(index).copied()
    }

    pub fn character_weights(&self) -> &[f64] {
        &self.weights
    }

    /// The timeline's text as one flat transcript
    pub fn transcript(&self) -> String {
        self.normalized
            .iter()
            .flat_map(|t| t.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn stats(&self) -> TimelineStats {
        let total_duration_ms: u64 = self.segments.iter().map(TimedSegment::duration).sum();
        let total_characters: usize = self.segments.iter().map(|s| visible_chars(&s.text)).sum();
        let average_characters_per_second = if total_duration_ms > 0 {
            total_characters as f64 / (total_duration_ms as f64 / 1000.0)
        } else {
            0.0
        };

        TimelineStats {
            total_duration_ms,
            total_characters,
            average_characters_per_second,
            total_blocks: self.segments.len(),
        }
    }

    pub fn into_segments(self) -> Vec<TimedSegment> {
        self.segments
    }
}

fn visible_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

fn character_weights(segments: &[TimedSegment]) -> Vec<f64> {
    let counts: Vec<usize> = segments.iter().map(|s| visible_chars(&s.text)).collect();
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0.0; segments.len()];
    }

    counts
        .into_iter()
        .map(|c| c as f64 * 100.0 / total as f64)
        .collect()
}
