use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Append-only evaluation sink.
///
/// One line per record:
/// `<rfc3339 timestamp> - INFO - Component: <c>, Metric: <m>, Value: <v>`
///
/// There is no read path; the file is an audit trail for later inspection.
#[derive(Debug, Clone)]
pub struct EvalLogger {
    path: PathBuf,
}

impl EvalLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one (component, metric, value) record.
    ///
    /// Must never fail the caller: a broken log must not break the pipeline,
    /// so every formatting and I/O error is swallowed here.
    pub fn record(&self, component: &str, metric: &str, value: f64) {
        let Ok(ts) = OffsetDateTime::now_utc().format(&Rfc3339) else {
            return;
        };
        let line =
            format!("{ts} - INFO - Component: {component}, Metric: {metric}, Value: {value}\n");
        let _ = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| f.write_all(line.as_bytes()));
    }
}
