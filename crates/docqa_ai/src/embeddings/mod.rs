use docqa_core::error::AppError;

pub mod hash_embed;
pub mod ollama_embed;

pub use hash_embed::HashEmbedder;
pub use ollama_embed::OllamaEmbedder;

/// Maps text to a fixed-dimension numeric vector.
///
/// Corpus and query vectors must come from the same embedder instance so
/// that similarity is meaningful, and the same input must always produce
/// the same vector. Implementations normalize their output to unit length
/// (an all-unhashable input may produce the zero vector, which the index
/// rejects at query time).
pub trait Embedder {
    fn embed(&self, input: &str) -> Result<Vec<f32>, AppError>;

    fn embed_batch(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>, AppError> {
        inputs.iter().map(|s| self.embed(s)).collect()
    }
}
