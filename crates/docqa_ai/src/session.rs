use docqa_core::chat::{ChatTurn, ConversationState};
use docqa_core::error::AppError;
use docqa_core::evallog::EvalLogger;
use serde::{Deserialize, Serialize};

use crate::chunking::{self, ChunkParams};
use crate::embeddings::Embedder;
use crate::extract::{self, UploadedDocument};
use crate::index::VectorIndex;
use crate::prompts;
use crate::registry::ModelRegistry;

/// Per-session tunables. Defaults follow the reference behavior:
/// 1000/200-character chunks split at newlines, top-3 retrieval.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub chunk: ChunkParams,
    pub top_k: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chunk: ChunkParams::default(),
            top_k: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessSummary {
    pub chunk_count: u32,
    /// Per-document extraction failures that degraded, not aborted, the
    /// batch.
    pub extraction_warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    /// Full conversation after this exchange, oldest first.
    pub history: Vec<ChatTurn>,
}

/// One user session: owns the current index and conversation.
///
/// Idle (no index) becomes Ready on the first successful `process`; each
/// `ask` returns the session to Ready whether it succeeded or not. A
/// successful `process` replaces the index and clears the conversation; a
/// failed action leaves both exactly as they were.
pub struct ChatSession {
    embedder: Box<dyn Embedder>,
    registry: ModelRegistry,
    eval: EvalLogger,
    config: SessionConfig,
    index: Option<VectorIndex>,
    history: ConversationState,
}

impl ChatSession {
    pub fn new(embedder: Box<dyn Embedder>, registry: ModelRegistry, eval: EvalLogger) -> Self {
        Self::with_config(embedder, registry, eval, SessionConfig::default())
    }

    pub fn with_config(
        embedder: Box<dyn Embedder>,
        registry: ModelRegistry,
        eval: EvalLogger,
        config: SessionConfig,
    ) -> Self {
        Self {
            embedder,
            registry,
            eval,
            config,
            index: None,
            history: ConversationState::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.index.is_some()
    }

    pub fn history(&self) -> &[ChatTurn] {
        self.history.turns()
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn indexed_chunks(&self) -> usize {
        self.index.as_ref().map_or(0, VectorIndex::len)
    }

    /// Build a fresh index from a document batch: extract, chunk, embed,
    /// index. The previous index and conversation survive any failure and
    /// are replaced only when the whole action succeeded.
    pub fn process(&mut self, docs: &[UploadedDocument]) -> Result<ProcessSummary, AppError> {
        let outcome = extract::extract_text(docs);
        let chunks = chunking::split_text(&outcome.text, &self.config.chunk);
        if chunks.is_empty() {
            return Err(AppError::new(
                "EMPTY_CONTENT",
                "No indexable content in the document batch",
            )
            .with_details(format!(
                "documents={}; extraction_warnings={}",
                docs.len(),
                outcome.warnings.len()
            )));
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts)?;
        let index = VectorIndex::build(chunks, embeddings)?;

        let chunk_count = index.len() as u32;
        self.index = Some(index);
        self.history.clear();

        self.eval
            .record("retrieval", "indexed_chunks", f64::from(chunk_count));
        Ok(ProcessSummary {
            chunk_count,
            extraction_warnings: outcome.warnings.iter().map(|w| w.to_string()).collect(),
        })
    }

    /// Answer one question against the current index with conversational
    /// continuity.
    ///
    /// The question is embedded with the same embedder as the corpus. The
    /// history gains the (question, answer) pair only when the whole request
    /// succeeded; any failure leaves the session Ready with its state
    /// untouched, so one bad request never requires reprocessing.
    pub fn ask(&mut self, question: &str, model_name: &str) -> Result<AskResponse, AppError> {
        let index = self.index.as_ref().ok_or_else(|| {
            AppError::new(
                "NO_DOCUMENTS_PROCESSED",
                "No documents have been processed yet",
            )
        })?;
        // Resolve the model before doing any work; an unknown name is
        // terminal for this request.
        let model = self.registry.get(model_name)?;

        let query_vec = self.embedder.embed(question)?;
        let hits = index.query(&query_vec, self.config.top_k)?;

        let context = prompts::build_context(&hits);
        let prompt = prompts::retrieval_qa_prompt(&context, question);
        let answer = model.complete(self.history.turns(), &prompt)?;

        if let Some(top) = hits.first() {
            self.eval
                .record("retrieval", "top_score", f64::from(top.score));
        }
        self.eval
            .record("generation", "answer_chars", answer.len() as f64);

        self.history.push_exchange(question, &answer);
        Ok(AskResponse {
            answer,
            history: self.history.turns().to_vec(),
        })
    }
}

/// Generic user-facing message for an action-boundary error. The detail
/// stays in the `AppError`; the user sees one sentence.
pub fn user_message(err: &AppError) -> String {
    let text = match err.code.as_str() {
        "EXTRACTION_FAILED" => "An error occurred while processing the PDF files.",
        "EMPTY_CONTENT" => "No readable text was found in the uploaded documents.",
        "NO_DOCUMENTS_PROCESSED" => "Please upload and process documents before asking a question.",
        "MODEL_NOT_FOUND" => "The selected model is not available.",
        "EMBEDDINGS_FAILED" | "INDEX_BUILD_FAILED" | "RETRIEVAL_FAILED" => {
            "An error occurred during processing."
        }
        "MODEL_INVOCATION_FAILED" => "An error occurred while processing your request.",
        _ => "An unexpected error occurred.",
    };
    text.to_string()
}
