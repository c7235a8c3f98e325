/*!
 * Timecode mapper: places resegmented chunks on a reference timeline.
 *
 * For every chunk, in emission order, the reference segments are walked in
 * order and the first admissible interval wins. A cursor holding the end of
 * the last accepted interval rejects matches that would move time
 * backwards, which is how repeated phrases are told apart.
 *
 * - `matching`: classification of a chunk against one segment
 * - `spans`: interval arithmetic, including walks across segments
 */

use log::{debug, warn};

use crate::errors::UnmappedChunkError;
use crate::resegment::Chunk;
use crate::timeline::{normalize_text, Interval, ReferenceTimeline};

pub mod matching;
pub mod spans;

pub use matching::{MatchKind, Position, SpanDirection};

/// A chunk with the interval the mapper found for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedChunk {
    pub chunk: Chunk,
    /// `None` when no reference segment admitted the chunk. Marker chunks
    /// are never mapped.
    pub interval: Option<Interval>,
}

impl MappedChunk {
    pub fn is_unmapped_text(&self) -> bool {
        self.interval.is_none() && !self.chunk.is_marker()
    }
}

/// One mapping run over a reference timeline
pub struct Mapper<'a> {
    reference: &'a ReferenceTimeline,
    cursor: u64,
}

impl<'a> Mapper<'a> {
    pub fn new(reference: &'a ReferenceTimeline) -> Self {
        Mapper {
            reference,
            cursor: 0,
        }
    }

    /// Earliest end time a new interval may have
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Find an interval for `chunk_text`, advancing the cursor on success
    pub fn map_chunk(&mut self, chunk_text: &str) -> Option<Interval> {
        let chunk = normalize_text(chunk_text);
        if chunk.is_empty() {
            return None;
        }

        for index in 0..self.reference.len() {
            let Some(text) = self.reference.text(index) else {
                continue;
            };
            if text.is_empty() {
                continue;
            }

            // Only the first resolvable kind faces the cursor; a stale one
            // moves matching on to the next segment
            let resolved = matching::classify(&chunk, text).into_iter().find_map(|kind| {
                spans::resolve(self.reference, index, &chunk, kind).map(|interval| (kind, interval))
            });
            let Some((kind, interval)) = resolved else {
                continue;
            };

            if interval.end < self.cursor {
                debug!(
                    "Skipping stale {:?} match on segment {} ({} ends before cursor {})",
                    kind,
                    index + 1,
                    interval,
                    self.cursor
                );
                continue;
            }

            debug!("Chunk \"{}\" -> {} via {:?} on segment {}", chunk, interval, kind, index + 1);
            self.cursor = interval.end;
            return Some(interval);
        }

        None
    }

    /// Map every chunk in order. Marker chunks pass through unmapped and
    /// leave the cursor alone.
    pub fn run(&mut self, chunks: Vec<Chunk>) -> Vec<MappedChunk> {
        chunks
            .into_iter()
            .map(|chunk| {
                let interval = if chunk.is_marker() {
                    None
                } else {
                    self.map_chunk(&chunk.text)
                };
                if interval.is_none() && !chunk.is_marker() {
                    warn!("No admissible interval for chunk \"{}\"", chunk.normalized());
                }
                MappedChunk { chunk, interval }
            })
            .collect()
    }
}

/// Map `chunks` onto `reference` with a fresh cursor
pub fn map_timeline(chunks: Vec<Chunk>, reference: &ReferenceTimeline) -> Vec<MappedChunk> {
    Mapper::new(reference).run(chunks)
}

/// Diagnostics for every text chunk left without an interval, numbered by
/// position among text chunks
pub fn unmapped_chunks(mapped: &[MappedChunk]) -> Vec<UnmappedChunkError> {
    mapped
        .iter()
        .filter(|m| !m.chunk.is_marker())
        .enumerate()
        .filter(|(_, m)| m.interval.is_none())
        .map(|(i, m)| UnmappedChunkError {
            index: i + 1,
            text: m.chunk.normalized(),
        })
        .collect()
}
