use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("Missing column '{column}'")]
    MissingColumn { column: String },

    #[error("Could not connect to graph store: {0}")]
    Connection(String),

    #[error("Query failed (HTTP {status}): {message}")]
    Query { status: u16, message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MigrateResult<T> = Result<T, MigrateError>;
