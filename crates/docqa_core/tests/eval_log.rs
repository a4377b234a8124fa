use docqa_core::evallog::EvalLogger;
use pretty_assertions::assert_eq;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

#[test]
fn appends_timestamped_records_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("evals.log");
    let logger = EvalLogger::new(&path);

    logger.record("retrieval", "indexed_chunks", 12.0);
    logger.record("generation", "answer_chars", 340.0);

    let contents = std::fs::read_to_string(&path).expect("read log");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("- INFO - Component: retrieval, Metric: indexed_chunks, Value: 12"));
    assert!(lines[1].ends_with("- INFO - Component: generation, Metric: answer_chars, Value: 340"));

    for line in lines {
        let ts = line.split(" - ").next().expect("timestamp field");
        assert!(
            OffsetDateTime::parse(ts, &Rfc3339).is_ok(),
            "line does not start with an RFC3339 timestamp: {line}"
        );
    }
}

#[test]
fn fractional_values_keep_their_precision() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("evals.log");
    let logger = EvalLogger::new(&path);

    logger.record("retrieval", "top_score", 0.85);

    let contents = std::fs::read_to_string(&path).expect("read log");
    assert!(contents.contains("Metric: top_score, Value: 0.85"));
}

#[test]
fn swallows_unwritable_log_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Pointing the logger at a directory makes the open fail; record must
    // still return normally.
    let logger = EvalLogger::new(dir.path());
    logger.record("retrieval", "indexed_chunks", 1.0);
}
