//! Swimrec Common Library
//!
//! Shared utilities for the swimrec workspace:
//!
//! - **Logging**: `tracing` subscriber setup driven by environment variables
//! - **Error Handling**: configuration/bootstrap error type and result alias

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{Result, SwimrecError};
