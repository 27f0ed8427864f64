use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record encoding error: {0}")]
    Record(#[from] carebook_core::error::CoreError),

    #[error("malformed audit log line {line}: {source}")]
    MalformedLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
