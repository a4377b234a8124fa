pub mod chunking;
pub mod embeddings;
pub mod extract;
pub mod index;
pub mod ollama;
pub mod prompts;
pub mod registry;
pub mod session;
pub mod similarity;
