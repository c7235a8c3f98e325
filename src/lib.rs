/*!
 * # subresync - resynchronization of re-segmented timed text
 *
 * A Rust library that times a new segmentation of a transcript against an
 * existing, time-stamped reference, without audio or video.
 *
 * ## Features
 *
 * - Re-wrap a flat transcript into one- or two-line display chunks
 * - Map every chunk onto the reference timeline by text matching and
 *   character-count interpolation
 * - Resolve overlaps between adjacent timed segments
 * - Check timelines for ordering, overlap and numbering issues
 * - Read and write timelines as JSON documents
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: `HH:MM:SS,mmm` codec and ratio durations
 * - `timeline`: Timed segments and the reference timeline
 * - `resegment`: Transcript re-wrapping
 * - `mapper`: Timecode mapping of chunks onto a reference:
 *   - `mapper::matching`: Chunk/segment classification
 *   - `mapper::spans`: Interval arithmetic across segments
 * - `overlap`: Overlap resolution
 * - `validation`: Sequence checks
 * - `pipeline`: The resegment, map and repair run
 * - `timeline_file`: JSON interchange
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod mapper;
pub mod overlap;
pub mod pipeline;
pub mod resegment;
pub mod timecode;
pub mod timeline;
pub mod timeline_file;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, SyncError, TimecodeError, UnmappedChunkError};
pub use mapper::{map_timeline, MappedChunk, MatchKind};
pub use overlap::resolve_overlaps;
pub use pipeline::{SyncOutcome, SyncPipeline};
pub use resegment::{resegment, Chunk, Resegmenter};
pub use timecode::{format_timecode, parse_timecode};
pub use timeline::{Interval, ReferenceTimeline, TimedSegment};
pub use validation::{check_sequence, SequenceIssue};
