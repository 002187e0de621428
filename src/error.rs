use thiserror::Error;

/// Failure categories surfaced by both pipelines. Pipeline code wraps these
/// with `anyhow` context (table name, script path) before they reach the
/// operator.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("{0} is required (set it in the environment or pass the flag)")]
    Config(String),
    #[error("unsupported input format {0:?}: expected .csv, .tsv, .xlsx, or .xls")]
    UnsupportedFormat(String),
    #[error("missing required columns after normalization: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },
    #[error("{0}")]
    NotFound(String),
    #[error("database execution failed: {source}")]
    Execution {
        #[from]
        source: rusqlite::Error,
    },
}
