use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Splitting parameters. Defaults reproduce the reference behavior:
/// newline-separated splits merged into 1000-character chunks with a
/// 200-character overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkParams {
    pub separator: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkParams {
    fn default() -> Self {
        Self {
            separator: "\n".to_string(),
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// A bounded segment of source text, the unit of retrieval. `ordinal`
/// preserves source order and is the tie-breaker in retrieval ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    pub ordinal: u32,
    pub text: String,
    pub text_sha256: String,
}

impl TextChunk {
    pub fn new(ordinal: u32, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            ordinal,
            text_sha256: sha256_hex(&text),
            text,
        }
    }
}

pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Split `text` at separator boundaries and merge the pieces into ordered,
/// overlapping chunks of at most `chunk_size` characters.
///
/// A separator-free run longer than `chunk_size` is kept intact as its own
/// chunk rather than hard-cut mid-run. Empty input yields no chunks, which
/// downstream treats as "no indexable content". Deterministic.
pub fn split_text(text: &str, params: &ChunkParams) -> Vec<TextChunk> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let sep = params.separator.as_str();
    let splits: Vec<&str> = if sep.is_empty() {
        vec![text.trim()]
    } else {
        text.split(sep)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    };
    if splits.is_empty() {
        return Vec::new();
    }

    merge_splits(&splits, sep, params)
        .into_iter()
        .enumerate()
        .map(|(i, chunk_text)| TextChunk::new(i as u32, chunk_text))
        .collect()
}

/// Greedy merge: fill the current chunk up to `chunk_size`, emit it, then
/// carry at most `chunk_overlap` trailing characters into the next chunk.
fn merge_splits(splits: &[&str], sep: &str, params: &ChunkParams) -> Vec<String> {
    let sep_len = sep.len();
    let mut chunks: Vec<String> = Vec::new();
    let mut current: VecDeque<&str> = VecDeque::new();
    // Character total of `current`, separators included.
    let mut total = 0usize;

    for part in splits {
        let part_len = part.len();
        let added = part_len + if current.is_empty() { 0 } else { sep_len };

        if total + added > params.chunk_size && !current.is_empty() {
            chunks.push(join(&current, sep));
            while !current.is_empty()
                && (total > params.chunk_overlap
                    || total + part_len + if current.is_empty() { 0 } else { sep_len }
                        > params.chunk_size)
            {
                let dropped = current.pop_front().unwrap_or_default();
                total -= dropped.len();
                if !current.is_empty() {
                    total -= sep_len;
                }
            }
        }

        total += part_len + if current.is_empty() { 0 } else { sep_len };
        current.push_back(part);
    }

    if !current.is_empty() {
        chunks.push(join(&current, sep));
    }
    chunks
}

fn join(parts: &VecDeque<&str>, sep: &str) -> String {
    parts.iter().copied().collect::<Vec<_>>().join(sep)
}
