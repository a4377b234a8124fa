use docqa_ai::chunking::TextChunk;
use docqa_ai::index::VectorIndex;
use pretty_assertions::assert_eq;

fn chunks(texts: &[&str]) -> Vec<TextChunk> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| TextChunk::new(i as u32, *t))
        .collect()
}

#[test]
fn refuses_to_build_from_no_chunks() {
    let err = VectorIndex::build(Vec::new(), Vec::new()).unwrap_err();
    assert_eq!(err.code, "EMPTY_CONTENT");
}

#[test]
fn refuses_mismatched_counts() {
    let err = VectorIndex::build(chunks(&["a", "b"]), vec![vec![1.0, 0.0]]).unwrap_err();
    assert_eq!(err.code, "INDEX_BUILD_FAILED");
}

#[test]
fn refuses_inconsistent_dimensions() {
    let err = VectorIndex::build(
        chunks(&["a", "b"]),
        vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]],
    )
    .unwrap_err();
    assert_eq!(err.code, "INDEX_BUILD_FAILED");
}

#[test]
fn indexed_chunk_is_its_own_top_hit() {
    let index = VectorIndex::build(
        chunks(&["first", "second", "third"]),
        vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ],
    )
    .expect("build");

    // Querying with an indexed vector must return its own chunk at rank 1.
    let hits = index.query(&[0.0, 1.0, 0.0], 3).expect("query");
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].chunk.text, "second");
    assert!((hits[0].score - 1.0).abs() < 1e-6);
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn ties_break_by_source_order() {
    // Two identical corpus vectors: the earlier ordinal must rank first.
    let index = VectorIndex::build(
        chunks(&["early", "late"]),
        vec![vec![1.0, 1.0], vec![1.0, 1.0]],
    )
    .expect("build");

    let hits = index.query(&[1.0, 1.0], 2).expect("query");
    assert_eq!(hits[0].chunk.text, "early");
    assert_eq!(hits[1].chunk.text, "late");
    assert_eq!(hits[0].score, hits[1].score);
}

#[test]
fn truncates_to_k() {
    let index = VectorIndex::build(
        chunks(&["a", "b", "c", "d"]),
        vec![
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.1, 0.9],
            vec![0.0, 1.0],
        ],
    )
    .expect("build");

    let hits = index.query(&[1.0, 0.0], 2).expect("query");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].chunk.text, "a");
}

#[test]
fn rejects_bad_queries() {
    let index = VectorIndex::build(chunks(&["a"]), vec![vec![1.0, 0.0]]).expect("build");

    let dims = index.query(&[1.0, 0.0, 0.0], 1).unwrap_err();
    assert_eq!(dims.code, "RETRIEVAL_FAILED");

    let zero = index.query(&[0.0, 0.0], 1).unwrap_err();
    assert_eq!(zero.code, "RETRIEVAL_FAILED");
}

#[test]
fn query_does_not_mutate_the_index() {
    let index = VectorIndex::build(
        chunks(&["a", "b"]),
        vec![vec![1.0, 0.0], vec![0.0, 1.0]],
    )
    .expect("build");

    let first = index.query(&[0.7, 0.3], 2).expect("query");
    let second = index.query(&[0.7, 0.3], 2).expect("query");
    assert_eq!(index.len(), 2);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.chunk, b.chunk);
        assert_eq!(a.score, b.score);
    }
}
