/*!
 * Sync pipeline: transcript and reference timeline in, timed segments out.
 *
 * Runs resegmentation, mapping and overlap repair in sequence and applies
 * the configured policy to chunks that found no interval.
 */

use log::{debug, info, warn};

use crate::app_config::{Config, UnmappedPolicy};
use crate::errors::{SyncError, UnmappedChunkError};
use crate::mapper::{map_timeline, unmapped_chunks, MappedChunk};
use crate::overlap::{resolve_overlaps, DEFAULT_BUFFER_MS};
use crate::resegment::Resegmenter;
use crate::timeline::{clean_segments, Interval, ReferenceTimeline, TimedSegment};
use crate::validation::{check_sequence, SequenceIssue};

/// Figures from one pipeline run
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Text chunks produced by the resegmenter
    pub chunks: usize,
    /// Pinned `##` breaks seen in the transcript
    pub markers: usize,
    /// Text chunks that found an interval
    pub mapped: usize,
    /// Text chunks that did not
    pub unmapped: Vec<UnmappedChunkError>,
    /// Unmapped chunks given a gap interval
    pub placeholders: usize,
    /// Issues left in the output after the final overlap pass
    pub remaining_issues: Vec<SequenceIssue>,
}

/// Result of a successful run
#[derive(Debug, Clone, Default)]
pub struct SyncOutcome {
    pub segments: Vec<TimedSegment>,
    pub report: SyncReport,
}

/// Configured resegment, map and repair run
#[derive(Debug, Clone)]
pub struct SyncPipeline {
    resegmenter: Resegmenter,
    policy: UnmappedPolicy,
    prepare_reference: bool,
    resolve_output: bool,
    buffer_ms: u64,
}

impl SyncPipeline {
    /// Pipeline with default policy, reference preparation and output repair
    pub fn new(resegmenter: Resegmenter) -> Self {
        Self {
            resegmenter,
            policy: UnmappedPolicy::default(),
            prepare_reference: true,
            resolve_output: true,
            buffer_ms: DEFAULT_BUFFER_MS,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, SyncError> {
        let (max, min) = config.sync.line_limits();
        if min > max {
            return Err(SyncError::InvalidLimits { min, max });
        }

        Ok(Self {
            resegmenter: Resegmenter::from_config(&config.sync),
            policy: config.sync.unmapped_policy,
            prepare_reference: config.sync.prepare_reference,
            resolve_output: config.overlap.resolve_output,
            buffer_ms: config.overlap.buffer_ms,
        })
    }

    pub fn with_policy(mut self, policy: UnmappedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_buffer(mut self, buffer_ms: u64) -> Self {
        self.buffer_ms = buffer_ms;
        self
    }

    pub fn with_reference_preparation(mut self, enabled: bool) -> Self {
        self.prepare_reference = enabled;
        self
    }

    pub fn with_output_resolution(mut self, enabled: bool) -> Self {
        self.resolve_output = enabled;
        self
    }

    pub fn policy(&self) -> UnmappedPolicy {
        self.policy
    }

    /// Reference timeline for `segments`. When preparation is enabled it is
    /// sorted by start, every text line is trimmed and adjacent overlaps
    /// are resolved.
    pub fn prepare_reference(&self, segments: &[TimedSegment]) -> ReferenceTimeline {
        if !self.prepare_reference {
            return ReferenceTimeline::new(segments.to_vec());
        }

        let sorted = ReferenceTimeline::sorted(segments.to_vec()).into_segments();
        let cleaned = clean_segments(&sorted);
        ReferenceTimeline::new(resolve_overlaps(&cleaned, self.buffer_ms))
    }

    /// Resegment `transcript` and time it against `reference_segments`
    pub fn run(
        &self,
        transcript: &str,
        reference_segments: &[TimedSegment],
    ) -> Result<SyncOutcome, SyncError> {
        if transcript.trim().is_empty() {
            warn!("Transcript is empty, nothing to synchronize");
            return Ok(SyncOutcome::default());
        }
        if reference_segments.is_empty() {
            warn!("Reference timeline is empty, nothing to synchronize against");
            return Ok(SyncOutcome::default());
        }

        let reference = self.prepare_reference(reference_segments);
        let chunks = self.resegmenter.resegment(transcript);
        let markers = chunks.iter().filter(|c| c.is_marker()).count();

        let mapped = map_timeline(chunks, &reference);
        let unmapped = unmapped_chunks(&mapped);

        if !unmapped.is_empty() && self.policy == UnmappedPolicy::Fail {
            return Err(SyncError::Unmapped(unmapped));
        }

        let mut report = SyncReport {
            chunks: mapped.len() - markers,
            markers,
            mapped: mapped.len() - markers - unmapped.len(),
            unmapped,
            ..SyncReport::default()
        };

        let (mut segments, placeholders) = place_chunks(&mapped, self.policy);
        report.placeholders = placeholders;

        if self.resolve_output {
            segments = resolve_overlaps(&segments, self.buffer_ms);
        }
        report.remaining_issues = check_sequence(&segments);

        info!(
            "Synchronized {} of {} chunks against {} reference segments",
            report.mapped,
            report.chunks,
            reference.len()
        );
        if !report.unmapped.is_empty() {
            warn!(
                "{} chunk(s) without interval handled by '{}' policy",
                report.unmapped.len(),
                self.policy
            );
        }

        Ok(SyncOutcome { segments, report })
    }
}

/// Timed segments for the text chunks in `mapped`, numbered from 1.
/// Returns the segments and the number of placeholders given out.
fn place_chunks(mapped: &[MappedChunk], policy: UnmappedPolicy) -> (Vec<TimedSegment>, usize) {
    let texts: Vec<&MappedChunk> = mapped.iter().filter(|m| !m.chunk.is_marker()).collect();
    let mut segments = Vec::with_capacity(texts.len());
    let mut placeholders = 0;
    let mut previous_end: Option<u64> = None;

    for (i, item) in texts.iter().enumerate() {
        let interval = match item.interval {
            Some(interval) => interval,
            None if policy == UnmappedPolicy::Placeholder => {
                let next_start = texts[i + 1..]
                    .iter()
                    .find_map(|m| m.interval)
                    .map(|iv| iv.start);
                let start = previous_end.or(next_start).unwrap_or(0);
                let end = next_start.unwrap_or(start);
                placeholders += 1;
                debug!("Placeholder {}..{} for \"{}\"", start, end, item.chunk.normalized());
                Interval::new(start, end)
            }
            None => continue,
        };

        if item.interval.is_some() {
            previous_end = Some(interval.end);
        }
        segments.push(TimedSegment::new(
            segments.len() + 1,
            interval.start,
            interval.end,
            item.chunk.text.clone(),
        ));
    }

    (segments, placeholders)
}
