//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
