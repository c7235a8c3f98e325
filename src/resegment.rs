/*!
 * Re-wrapping of a flat transcript into display chunks.
 *
 * Each chunk holds one or two display lines. Line lengths stay inside a
 * `(min_chars, max_chars)` band, preferring whitespace and, for the second
 * line, punctuation as break points. A literal `##` in the transcript pins
 * a chunk boundary and is emitted as a marker chunk of its own.
 */

use log::debug;

use crate::app_config::SyncConfig;
use crate::timeline::normalize_text;

/// Characters eligible as preferred break points by default
pub const DEFAULT_PUNCTUATION: [char; 5] = ['.', ',', '?', ':', '!'];

/// Manually pinned break point
pub const BREAK_MARKER: &str = "##";

/// What a chunk carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// Display text awaiting a time interval
    Text,
    /// A pinned `##` break
    Marker,
}

/// An unanchored piece of re-wrapped text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Display lines joined with `\n`
    pub text: String,
    pub kind: ChunkKind,
}

impl Chunk {
    pub fn text(text: impl Into<String>) -> Self {
        Chunk {
            text: text.into(),
            kind: ChunkKind::Text,
        }
    }

    pub fn marker() -> Self {
        Chunk {
            text: BREAK_MARKER.to_string(),
            kind: ChunkKind::Marker,
        }
    }

    pub fn is_marker(&self) -> bool {
        self.kind == ChunkKind::Marker
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Text as the mapper compares it
    pub fn normalized(&self) -> String {
        normalize_text(&self.text)
    }
}

/// Display constraints for re-wrapping
#[derive(Debug, Clone)]
pub struct Resegmenter {
    max_chars: usize,
    min_chars: usize,
    prefer_punctuation: bool,
    punctuation: Vec<char>,
}

impl Resegmenter {
    /// Resegmenter with the default punctuation set, preferring it
    pub fn new(max_chars: usize, min_chars: usize) -> Self {
        Resegmenter {
            max_chars,
            min_chars,
            prefer_punctuation: true,
            punctuation: DEFAULT_PUNCTUATION.to_vec(),
        }
    }

    pub fn with_punctuation(mut self, prefer: bool, punctuation: &[char]) -> Self {
        self.prefer_punctuation = prefer;
        self.punctuation = punctuation.to_vec();
        self
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        let (max_chars, min_chars) = config.line_limits();
        Self::new(max_chars, min_chars)
            .with_punctuation(config.split_at_punctuation, &config.punctuations)
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    /// Split `transcript` into ordered chunks. Whitespace runs are
    /// collapsed first; empty input yields no chunks.
    pub fn resegment(&self, transcript: &str) -> Vec<Chunk> {
        let flat = transcript.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut chunks = Vec::new();

        for (i, part) in flat.split(BREAK_MARKER).enumerate() {
            if i > 0 {
                chunks.push(Chunk::marker());
            }
            self.wrap_into(part, &mut chunks);
        }

        debug!(
            "Resegmented {} chars into {} chunks (max {}, min {})",
            flat.chars().count(),
            chunks.len(),
            self.max_chars,
            self.min_chars
        );

        chunks
    }

    fn wrap_into(&self, text: &str, chunks: &mut Vec<Chunk>) {
        let chars: Vec<char> = text.chars().collect();
        let mut rest = skip_whitespace(&chars);

        while !rest.is_empty() {
            // First line never breaks at punctuation
            let split = find_split_index(rest, self.max_chars, self.min_chars, false, &self.punctuation);
            let line_one = collect_trimmed(&rest[..split]);
            let remainder = skip_whitespace(&rest[split..]);

            let split = find_split_index(
                remainder,
                self.max_chars,
                self.min_chars,
                self.prefer_punctuation,
                &self.punctuation,
            );
            let line_two = collect_trimmed(&remainder[..split]);
            rest = skip_whitespace(&remainder[split..]);

            let lines: Vec<String> = [line_one, line_two]
                .into_iter()
                .filter(|l| !l.is_empty())
                .collect();
            if !lines.is_empty() {
                chunks.push(Chunk::text(lines.join("\n")));
            }
        }
    }
}

/// Convenience wrapper over [`Resegmenter`]
pub fn resegment(
    transcript: &str,
    max_chars: usize,
    min_chars: usize,
    prefer_punctuation: bool,
    punctuation: &[char],
) -> Vec<Chunk> {
    Resegmenter::new(max_chars, min_chars)
        .with_punctuation(prefer_punctuation, punctuation)
        .resegment(transcript)
}

/// Index at which `text` should be cut to form one display line.
///
/// Text no longer than `min_chars` is taken whole. With `prefer_punctuation`
/// the rightmost punctuation in `[min_chars, max_chars]` not followed by a
/// digit wins (the cut lands after it). Next comes the rightmost whitespace
/// in `[0, max_chars]`, and finally a hard break at `max_chars`. Non-empty
/// input always yields an index of at least 1.
pub fn find_split_index(
    text: &[char],
    max_chars: usize,
    min_chars: usize,
    prefer_punctuation: bool,
    punctuation: &[char],
) -> usize {
    let len = text.len();
    if len == 0 {
        return 0;
    }
    if len <= min_chars {
        return len;
    }

    let max_chars = max_chars.min(len - 1);

    if prefer_punctuation && min_chars <= max_chars {
        for i in (min_chars..=max_chars).rev() {
            if punctuation.contains(&text[i]) && i + 1 < len && !text[i + 1].is_ascii_digit() {
                return i + 1;
            }
        }
    }

    if let Some(i) = (0..=max_chars).rev().find(|&i| text[i].is_whitespace()) {
        if i > 0 {
            return i;
        }
    }

    max_chars.max(1)
}

fn skip_whitespace(chars: &[char]) -> &[char] {
    let start = chars
        .iter()
        .position(|c| !c.is_whitespace())
        .unwrap_or(chars.len());
    &chars[start..]
}

fn collect_trimmed(chars: &[char]) -> String {
    chars.iter().collect::<String>().trim().to_string()
}
