//! pf-results: stored network snapshots.

pub mod hash;
pub mod store;
pub mod types;

pub use hash::compute_record_id;
pub use store::SnapshotStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {record_id}")]
    RecordNotFound { record_id: String },
}
