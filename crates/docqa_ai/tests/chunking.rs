use docqa_ai::chunking::{split_text, ChunkParams};
use pretty_assertions::assert_eq;

fn params(separator: &str, chunk_size: usize, chunk_overlap: usize) -> ChunkParams {
    ChunkParams {
        separator: separator.to_string(),
        chunk_size,
        chunk_overlap,
    }
}

#[test]
fn empty_input_yields_no_chunks() {
    assert!(split_text("", &ChunkParams::default()).is_empty());
    assert!(split_text("   \n  \n ", &ChunkParams::default()).is_empty());
}

#[test]
fn short_input_is_one_chunk() {
    let chunks = split_text("a single short paragraph", &ChunkParams::default());
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "a single short paragraph");
    assert_eq!(chunks[0].ordinal, 0);
}

#[test]
fn chunking_is_deterministic() {
    let text = "alpha\nbravo\ncharlie\ndelta\necho\nfoxtrot";
    let p = params("\n", 12, 6);
    assert_eq!(split_text(text, &p), split_text(text, &p));
}

#[test]
fn consecutive_chunks_overlap() {
    // Splits of 3 chars merged into 10-char chunks with 5 chars of overlap:
    // each emitted chunk shares its leading split with the previous chunk's
    // trailing split.
    let chunks = split_text("aaa\nbbb\nccc\nddd", &params("\n", 10, 5));
    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["aaa\nbbb", "bbb\nccc", "ccc\nddd"]);
    for (i, c) in chunks.iter().enumerate() {
        assert_eq!(c.ordinal, i as u32);
    }
}

#[test]
fn no_overlap_when_overlap_is_zero() {
    let chunks = split_text("aaa\nbbb\nccc\nddd", &params("\n", 7, 0));
    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["aaa\nbbb", "ccc\nddd"]);
}

#[test]
fn oversized_separator_free_run_stays_intact() {
    // No hard cut mid-run: a run longer than chunk_size becomes one chunk.
    let long = "x".repeat(50);
    let chunks = split_text(&long, &params("\n", 10, 2));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, long);
}

#[test]
fn unit_size_splits_each_token_into_its_own_chunk() {
    // Chunk size smaller than any split: every split becomes its own chunk,
    // in source order.
    let chunks = split_text("A. B. C.", &params(" ", 1, 0));
    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["A.", "B.", "C."]);
    assert_eq!(chunks[1].ordinal, 1);
}

#[test]
fn chunks_carry_content_hashes() {
    let chunks = split_text("same\nsame\nother", &params("\n", 4, 0));
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].text_sha256, chunks[1].text_sha256);
    assert_ne!(chunks[0].text_sha256, chunks[2].text_sha256);
    assert_eq!(chunks[0].text_sha256.len(), 64);
}
