use docqa_core::error::AppError;

use super::Embedder;
use crate::similarity;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// Deterministic local embedder: FNV-1a character n-gram feature hashing.
///
/// No model files, no network. The same input always produces the same
/// unit-norm vector, which makes test fixtures reproducible. Not a semantic
/// model; it captures lexical overlap, which is enough to rank chunks that
/// share wording with the question.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
    ngram_min: usize,
    ngram_max: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        debug_assert!(dimension > 0, "dimension must be > 0");
        Self {
            dimension,
            ngram_min: 3,
            ngram_max: 4,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

impl Default for HashEmbedder {
    // 384 matches the MiniLM-class sentence models this stands in for.
    fn default() -> Self {
        Self::new(384)
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

impl Embedder for HashEmbedder {
    fn embed(&self, input: &str) -> Result<Vec<f32>, AppError> {
        let mut vector = vec![0.0f32; self.dimension];
        let lower = input.to_lowercase();
        let chars: Vec<char> = lower.chars().collect();
        if chars.is_empty() {
            return Ok(vector);
        }

        if chars.len() < self.ngram_min {
            // Too short for any n-gram: hash the whole input once so short
            // queries still land somewhere.
            bump(&mut vector, fnv1a(lower.as_bytes()));
        }
        for n in self.ngram_min..=self.ngram_max {
            if n > chars.len() {
                break;
            }
            for window in chars.windows(n) {
                let gram: String = window.iter().collect();
                bump(&mut vector, fnv1a(gram.as_bytes()));
            }
        }

        similarity::normalize(&mut vector);
        Ok(vector)
    }
}

fn bump(vector: &mut [f32], hash: u64) {
    let bucket = (hash as usize) % vector.len();
    let sign = if (hash >> 32) & 1 == 0 { 1.0 } else { -1.0 };
    vector[bucket] += sign;
}
