use docqa_core::error::AppError;
use serde::{Deserialize, Serialize};

use crate::chunking::TextChunk;
use crate::similarity;

/// One retrieval hit: a chunk plus its cosine similarity to the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedChunk {
    pub chunk: TextChunk,
    pub score: f32,
}

#[derive(Debug, Clone)]
struct IndexEntry {
    chunk: TextChunk,
    vector: Vec<f32>,
    norm: f32,
}

/// In-memory vector index over one document batch.
///
/// Immutable once built: a reprocess builds a fresh index and replaces this
/// one wholesale, there is no incremental update path. `query` takes `&self`
/// and never mutates.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dims: usize,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Pair each chunk with its embedding, in order.
    ///
    /// Refuses to build a degenerate index: an empty chunk sequence is
    /// `EMPTY_CONTENT`, mismatched counts or inconsistent dimensions are
    /// `INDEX_BUILD_FAILED`.
    pub fn build(chunks: Vec<TextChunk>, embeddings: Vec<Vec<f32>>) -> Result<Self, AppError> {
        if chunks.is_empty() {
            return Err(AppError::new("EMPTY_CONTENT", "No content to index"));
        }
        if chunks.len() != embeddings.len() {
            return Err(AppError::new(
                "INDEX_BUILD_FAILED",
                "Chunk and embedding counts do not match",
            )
            .with_details(format!(
                "chunks={}; embeddings={}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let dims = embeddings[0].len();
        if dims == 0 {
            return Err(AppError::new(
                "INDEX_BUILD_FAILED",
                "Embeddings have zero dimensions",
            ));
        }

        let mut entries = Vec::with_capacity(chunks.len());
        for (chunk, vector) in chunks.into_iter().zip(embeddings) {
            if vector.len() != dims {
                return Err(AppError::new(
                    "INDEX_BUILD_FAILED",
                    "Embedding dimension mismatch across chunks",
                )
                .with_details(format!(
                    "expected={}; got={}; ordinal={}",
                    dims,
                    vector.len(),
                    chunk.ordinal
                )));
            }
            let norm = similarity::l2_norm(&vector);
            entries.push(IndexEntry {
                chunk,
                vector,
                norm,
            });
        }

        Ok(Self { dims, entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Return the `k` highest-similarity chunks, descending score, ties
    /// broken by ascending chunk ordinal (stable, source order).
    pub fn query(&self, query_vec: &[f32], k: usize) -> Result<Vec<RetrievedChunk>, AppError> {
        if query_vec.len() != self.dims {
            return Err(AppError::new(
                "RETRIEVAL_FAILED",
                "Query embedding dims do not match index dims",
            )
            .with_details(format!(
                "index_dims={}; query_dims={}",
                self.dims,
                query_vec.len()
            )));
        }
        let qnorm = similarity::l2_norm(query_vec);
        if qnorm == 0.0 {
            return Err(AppError::new(
                "RETRIEVAL_FAILED",
                "Query embedding norm is zero",
            ));
        }
        let k = k.max(1);

        let mut hits: Vec<(usize, f32)> = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.norm == 0.0 {
                continue;
            }
            let score = similarity::cosine_similarity(query_vec, &entry.vector, qnorm, entry.norm);
            hits.push((i, score));
        }

        hits.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        hits.truncate(k);

        Ok(hits
            .into_iter()
            .map(|(i, score)| RetrievedChunk {
                chunk: self.entries[i].chunk.clone(),
                score,
            })
            .collect())
    }
}
