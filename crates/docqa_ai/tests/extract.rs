use docqa_ai::extract::{extract_text, UploadedDocument};
use pretty_assertions::assert_eq;

fn doc(name: &str, bytes: &[u8]) -> UploadedDocument {
    UploadedDocument::new(name, bytes.to_vec())
}

#[test]
fn concatenates_plain_text_documents_in_input_order() {
    let out = extract_text(&[
        doc("one.txt", b"first document"),
        doc("two.md", b"second document"),
    ]);
    assert_eq!(out.text, "first document\nsecond document");
    assert!(out.warnings.is_empty());
}

#[test]
fn empty_batch_yields_empty_text() {
    let out = extract_text(&[]);
    assert_eq!(out.text, "");
    assert!(out.warnings.is_empty());
}

#[test]
fn corrupt_pdf_degrades_to_a_warning_not_an_abort() {
    let out = extract_text(&[
        doc("broken.pdf", b"%PDF-1.4 this is not a real pdf"),
        doc("readable.txt", b"still here"),
    ]);
    // The readable document survives; the corrupt one is reported.
    assert_eq!(out.text, "still here");
    assert_eq!(out.warnings.len(), 1);
    assert_eq!(out.warnings[0].code, "EXTRACTION_FAILED");
    assert!(out.warnings[0]
        .details
        .as_deref()
        .unwrap_or_default()
        .contains("broken.pdf"));
}

#[test]
fn all_unreadable_batch_yields_empty_text_with_warnings() {
    let out = extract_text(&[doc("a.pdf", b"%PDF- junk"), doc("b.pdf", b"%PDF- junk")]);
    assert_eq!(out.text, "");
    assert_eq!(out.warnings.len(), 2);
}

#[test]
fn pdf_detection_uses_extension_or_magic_bytes() {
    // Named .pdf but without magic bytes: still treated as PDF and refused.
    let out = extract_text(&[doc("fake.PDF", b"just some text")]);
    assert_eq!(out.text, "");
    assert_eq!(out.warnings.len(), 1);
}
