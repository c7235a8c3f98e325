/*!
 * JSON interchange for timelines.
 *
 * A timeline document lists entries with a block number, a
 * `HH:MM:SS,mmm --> HH:MM:SS,mmm` time code and the display text, followed
 * by aggregate figures. The figures are informational: they are recomputed
 * on every save and ignored on load.
 */

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::TimecodeError;
use crate::file_utils::FileManager;
use crate::timecode::{format_time_range, parse_time_range};
use crate::timeline::{ReferenceTimeline, TimedSegment};

/// One timed block as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub block_number: usize,

    pub time_code: String,

    pub text: String,

    // @field: Non-whitespace characters in text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_characters: Option<usize>,

    // @field: Duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl TimelineEntry {
    pub fn from_segment(segment: &TimedSegment) -> Self {
        TimelineEntry {
            block_number: segment.sequence_index,
            time_code: format_time_range(segment.start, segment.end),
            text: segment.text.clone(),
            num_characters: Some(segment.text.chars().filter(|c| !c.is_whitespace()).count()),
            duration: Some(segment.duration() as f64 / 1000.0),
        }
    }

    pub fn to_segment(&self) -> Result<TimedSegment, TimecodeError> {
        let (start, end) = parse_time_range(&self.time_code)?;
        Ok(TimedSegment::new(self.block_number, start, end, self.text.trim()))
    }
}

/// A timeline as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineDocument {
    #[serde(default)]
    pub entries: Vec<TimelineEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<serde_json::Value>,
}

impl TimelineDocument {
    pub fn from_segments(segments: &[TimedSegment]) -> Self {
        let stats = ReferenceTimeline::new(segments.to_vec()).stats();
        TimelineDocument {
            entries: segments.iter().map(TimelineEntry::from_segment).collect(),
            additional_info: serde_json::to_value(stats).ok(),
        }
    }

    /// Decode every entry's time code
    pub fn to_segments(&self) -> Result<Vec<TimedSegment>, TimecodeError> {
        self.entries.iter().map(TimelineEntry::to_segment).collect()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse timeline JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize timeline to JSON")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let document = Self::from_json(&content)
            .with_context(|| format!("Invalid timeline file: {:?}", path))?;
        debug!("Loaded {} entries from {:?}", document.entries.len(), path);
        Ok(document)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path, &self.to_json()?)
    }
}

/// Load the segments of a timeline file
pub fn load_segments<P: AsRef<Path>>(path: P) -> Result<Vec<TimedSegment>> {
    let path = path.as_ref();
    TimelineDocument::load(path)?
        .to_segments()
        .with_context(|| format!("Invalid time code in {:?}", path))
}

/// Write `segments` as a timeline file
pub fn save_segments<P: AsRef<Path>>(path: P, segments: &[TimedSegment]) -> Result<()> {
    TimelineDocument::from_segments(segments).save(path)
}
