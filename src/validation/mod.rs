/*!
 * Validation of timed segment sequences.
 *
 * - `sequence`: Ordering, overlap and numbering checks
 */

pub mod sequence;

// Re-export main types
pub use sequence::{check_sequence, SequenceIssue};
