//! Errors at the persistence boundary.
//!
//! The controller never surfaces these; they are logged and the session
//! keeps running on its in-memory state.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode record: {0}")]
    Encode(String),

    #[error("Failed to decode record: {0}")]
    Decode(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
