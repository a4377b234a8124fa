use crate::index::RetrievedChunk;

/// Sentence the model must return verbatim when the retrieved context does
/// not support an answer.
pub const NO_ANSWER_FALLBACK: &str =
    "I can't find the final answer but you may want to check the following links";

/// Join retrieved chunk texts, in retrieval order, into the context block.
pub fn build_context(hits: &[RetrievedChunk]) -> String {
    hits.iter()
        .map(|h| h.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Fixed retrieval-QA prompt skeleton: context, then the literal question.
pub fn retrieval_qa_prompt(context: &str, question: &str) -> String {
    format!(
        r#"Use the following pieces of context to answer the question at the end. Please follow the following rules:
1. If you don't know the answer, don't try to make up an answer. Just say "{NO_ANSWER_FALLBACK}".
2. If you find the answer, write the answer in a concise way with five sentences maximum.

{context}

Question: {question}

Helpful Answer:
"#
    )
}
