/*!
 * Classification of a chunk against one reference segment.
 *
 * The variants of [`MatchKind`] are listed in the order the mapper tries
 * them. [`classify`] returns the candidates for one segment, already in
 * priority order.
 */

/// Where the shorter text sits inside the longer one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Start,
    End,
    Middle,
}

impl Position {
    fn locate(offset: usize, inner_len: usize, outer_len: usize) -> Self {
        if offset == 0 {
            Position::Start
        } else if offset + inner_len == outer_len {
            Position::End
        } else {
            Position::Middle
        }
    }
}

/// Which way the unmatched remainder of a partially matched chunk lies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanDirection {
    /// A chunk prefix closes the segment; the rest is in following segments
    Forward,
    /// A chunk suffix opens the segment; the rest is in preceding segments
    Backward,
}

/// How a chunk relates to a reference segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Same text
    Exact,
    /// The chunk is a substring of the segment, at byte `offset`
    ContainedInSegment { position: Position, offset: usize },
    /// The segment is a substring of the chunk, at byte `offset`
    SegmentInChunk { position: Position, offset: usize },
    /// Chunk text split at byte `split`: the anchored part overlaps the
    /// segment, the remainder must be found next to it
    PartialSpan { direction: SpanDirection, split: usize },
}

/// Candidate matches of `chunk` against `segment`, best first.
///
/// Both texts must already be normalized. Exact and containment matches are
/// unique; partial spans list every split at a word boundary with the
/// anchored part longest first, forward spans before backward ones. An
/// empty result means the texts share nothing at a segment boundary.
pub fn classify(chunk: &str, segment: &str) -> Vec<MatchKind> {
    if chunk.is_empty() || segment.is_empty() {
        return Vec::new();
    }

    if chunk == segment {
        return vec![MatchKind::Exact];
    }

    if let Some(offset) = segment.find(chunk) {
        return vec![MatchKind::ContainedInSegment {
            position: Position::locate(offset, chunk.len(), segment.len()),
            offset,
        }];
    }

    if let Some(offset) = chunk.find(segment) {
        return vec![MatchKind::SegmentInChunk {
            position: Position::locate(offset, segment.len(), chunk.len()),
            offset,
        }];
    }

    // Segment boundaries sit on whitespace in the transcript, so a split
    // must leave whitespace on the side of the remainder
    let splits: Vec<usize> = chunk.char_indices().map(|(i, _)| i).skip(1).collect();

    let forward = splits
        .iter()
        .rev()
        .filter(|&&split| chunk[split..].starts_with(char::is_whitespace))
        .filter(|&&split| segment.ends_with(&chunk[..split]))
        .map(|&split| MatchKind::PartialSpan {
            direction: SpanDirection::Forward,
            split,
        });

    let backward = splits
        .iter()
        .filter(|&&split| chunk[..split].ends_with(char::is_whitespace))
        .filter(|&&split| segment.starts_with(&chunk[split..]))
        .map(|&split| MatchKind::PartialSpan {
            direction: SpanDirection::Backward,
            split,
        });

    forward.chain(backward).collect()
}
