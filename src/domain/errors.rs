use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Query failed: {0}")]
    Query(String),
    #[error("Shape mismatch in {table}: {detail}")]
    ShapeMismatch { table: &'static str, detail: String },
    #[error("Invalid record in {table} at line {line}: {message}")]
    InvalidRecord {
        table: &'static str,
        line: u64,
        message: String,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
