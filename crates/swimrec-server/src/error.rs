//! Server-specific error types

use thiserror::Error;

use crate::db::DbError;

/// Result type alias for server startup and shutdown
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Errors that stop the server from starting or running
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid bind address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("Server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
