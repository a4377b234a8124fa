use docqa_core::error::AppError;

/// One uploaded document: a display name plus raw bytes. Ephemeral, lives
/// only for the duration of one `process` action.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Combined text of a document batch plus per-document extraction warnings.
///
/// An empty `text` with non-empty `warnings` means "nothing usable"; the
/// caller decides whether that is fatal (it is, for indexing).
#[derive(Debug, Default)]
pub struct ExtractOutcome {
    pub text: String,
    pub warnings: Vec<AppError>,
}

/// Extract text from every document in input order and concatenate.
///
/// A document that cannot be read is reported as a warning and skipped; the
/// batch never aborts, so partial text from the readable documents survives.
pub fn extract_text(docs: &[UploadedDocument]) -> ExtractOutcome {
    let mut out = ExtractOutcome::default();
    for doc in docs {
        match extract_document(doc) {
            Ok(text) => {
                if !out.text.is_empty() && !text.is_empty() {
                    out.text.push('\n');
                }
                out.text.push_str(&text);
            }
            Err(err) => out.warnings.push(err),
        }
    }
    out
}

fn looks_like_pdf(doc: &UploadedDocument) -> bool {
    doc.bytes.starts_with(b"%PDF-") || doc.name.to_ascii_lowercase().ends_with(".pdf")
}

fn extract_document(doc: &UploadedDocument) -> Result<String, AppError> {
    if looks_like_pdf(doc) {
        pdf_extract::extract_text_from_mem(&doc.bytes).map_err(|e| {
            AppError::new("EXTRACTION_FAILED", "Failed to extract text from PDF")
                .with_details(format!("doc={}; err={}", doc.name, e))
        })
    } else {
        // Anything else is treated as plain text.
        Ok(String::from_utf8_lossy(&doc.bytes).into_owned())
    }
}
