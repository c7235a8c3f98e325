/*!
 * Error types for the subresync crate.
 *
 * This module contains custom error types for the different stages of a
 * resynchronization run, using the thiserror crate for ergonomic error
 * definitions.
 */

use thiserror::Error;

/// Errors raised by the time codec
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimecodeError {
    /// The string is not a `HH:MM:SS,mmm` timecode
    #[error("Malformed timecode '{0}': expected HH:MM:SS,mmm")]
    Format(String),

    /// Minutes or seconds outside 0..60
    #[error("Timecode field out of range in '{0}'")]
    OutOfRange(String),

    /// The string is not a `start --> end` pair
    #[error("Malformed time range '{0}': expected 'HH:MM:SS,mmm --> HH:MM:SS,mmm'")]
    Range(String),

    /// A negative value was handed to the formatter
    #[error("Timecode must be a non-negative millisecond count, got {0}")]
    Negative(i64),
}

/// A chunk the mapper could not place on the reference timeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("chunk {index} has no admissible interval: \"{text}\"")]
pub struct UnmappedChunkError {
    /// 1-based position of the chunk in the resegmented output
    pub index: usize,
    /// Chunk text with line breaks collapsed
    pub text: String,
}

/// Errors that can occur while resynchronizing a timeline
#[derive(Error, Debug)]
pub enum SyncError {
    /// One or more chunks were left unmapped and the policy forbids it
    #[error("{} chunk(s) could not be placed on the reference timeline:\n{}", .0.len(), list_unmapped(.0))]
    Unmapped(Vec<UnmappedChunkError>),

    /// Line limits that cannot produce a segmentation
    #[error("Invalid line limits: min_chars {min} exceeds max_chars {max}")]
    InvalidLimits { min: usize, max: usize },
}

fn list_unmapped(chunks: &[UnmappedChunkError]) -> String {
    chunks
        .iter()
        .map(|c| format!("  - {}", c))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the time codec
    #[error("Timecode error: {0}")]
    Timecode(#[from] TimecodeError),

    /// Error from the sync pipeline
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
