use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::overlap::DEFAULT_BUFFER_MS;
use crate::resegment::DEFAULT_PUNCTUATION;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Resegmentation and mapping settings
    #[serde(default)]
    pub sync: SyncConfig,

    /// Overlap repair settings
    #[serde(default)]
    pub overlap: OverlapConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Named line length presets
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinePreset {
    // @preset: 42 / 30 characters per line
    #[default]
    Standard,
    // @preset: 30 / 20 characters per line
    Compact,
    // @preset: Explicit max_chars_per_line / min_chars_per_line
    Custom,
}

impl LinePreset {
    // @returns: (max, min) characters per line, None for Custom
    pub fn limits(&self) -> Option<(usize, usize)> {
        match self {
            Self::Standard => Some((42, 30)),
            Self::Compact => Some((30, 20)),
            Self::Custom => None,
        }
    }

    // @returns: Lowercase preset identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Standard => "standard".to_string(),
            Self::Compact => "compact".to_string(),
            Self::Custom => "custom".to_string(),
        }
    }
}

impl std::fmt::Display for LinePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for LinePreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "normal" => Ok(Self::Standard),
            "compact" | "short" => Ok(Self::Compact),
            "custom" => Ok(Self::Custom),
            _ => Err(anyhow!("Invalid line preset: {}", s)),
        }
    }
}

/// What to do with chunks that found no interval
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    // @policy: Abort the run and list the chunks
    #[default]
    Fail,
    // @policy: Drop them from the output with a warning
    Skip,
    // @policy: Give them the gap between their mapped neighbours
    Placeholder,
}

impl std::fmt::Display for UnmappedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Fail => "fail",
            Self::Skip => "skip",
            Self::Placeholder => "placeholder",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for UnmappedPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "skip" => Ok(Self::Skip),
            "placeholder" => Ok(Self::Placeholder),
            _ => Err(anyhow!("Invalid unmapped policy: {}", s)),
        }
    }
}

/// Resegmentation and mapping configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SyncConfig {
    // @field: Line length preset
    #[serde(default)]
    pub preset: LinePreset,

    // @field: Max chars per line, used by the custom preset
    #[serde(default = "default_max_chars_per_line")]
    pub max_chars_per_line: usize,

    // @field: Min chars per line, used by the custom preset
    #[serde(default = "default_min_chars_per_line")]
    pub min_chars_per_line: usize,

    // @field: Prefer punctuation when breaking the second line
    #[serde(default = "default_true")]
    pub split_at_punctuation: bool,

    // @field: Characters that count as punctuation break points
    #[serde(default = "default_punctuations")]
    pub punctuations: Vec<char>,

    // @field: Handling of chunks left without an interval
    #[serde(default)]
    pub unmapped_policy: UnmappedPolicy,

    // @field: Sort and de-overlap the reference before mapping
    #[serde(default = "default_true")]
    pub prepare_reference: bool,
}

impl SyncConfig {
    /// Effective `(max_chars, min_chars)` for the configured preset
    pub fn line_limits(&self) -> (usize, usize) {
        self.preset
            .limits()
            .unwrap_or((self.max_chars_per_line, self.min_chars_per_line))
    }

    /// Switch to explicit line limits
    pub fn with_limits(mut self, max_chars: usize, min_chars: usize) -> Self {
        self.preset = LinePreset::Custom;
        self.max_chars_per_line = max_chars;
        self.min_chars_per_line = min_chars;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            preset: LinePreset::default(),
            max_chars_per_line: default_max_chars_per_line(),
            min_chars_per_line: default_min_chars_per_line(),
            split_at_punctuation: true,
            punctuations: default_punctuations(),
            unmapped_policy: UnmappedPolicy::default(),
            prepare_reference: true,
        }
    }
}

/// Overlap repair configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OverlapConfig {
    /// Gap in ms left between segments that overlapped
    #[serde(default = "default_buffer_ms")]
    pub buffer_ms: u64,

    /// Whether synced output gets a final overlap pass
    #[serde(default = "default_true")]
    pub resolve_output: bool,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            buffer_ms: default_buffer_ms(),
            resolve_output: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_max_chars_per_line() -> usize {
    42
}

fn default_min_chars_per_line() -> usize {
    30
}

fn default_punctuations() -> Vec<char> {
    DEFAULT_PUNCTUATION.to_vec()
}

fn default_buffer_ms() -> u64 {
    DEFAULT_BUFFER_MS
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let (max_chars, min_chars) = self.sync.line_limits();
        if max_chars == 0 {
            return Err(anyhow!("max_chars_per_line must be greater than 0"));
        }
        if min_chars > max_chars {
            return Err(anyhow!(
                "min_chars_per_line ({}) exceeds max_chars_per_line ({})",
                min_chars,
                max_chars
            ));
        }
        if self.sync.punctuations.iter().any(|c| c.is_whitespace()) {
            return Err(anyhow!("punctuations must not contain whitespace"));
        }

        Ok(())
    }
}
