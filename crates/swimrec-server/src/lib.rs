//! Swimrec Server Library
//!
//! HTTP API for swim records.
//!
//! # Overview
//!
//! - **Records API**: CRUD plus a filtered, paginated listing with
//!   hypermedia links
//! - **Record Store**: PostgreSQL (SQLx) or in-memory storage behind one trait
//! - **Configuration**: Environment-based configuration management
//! - **Middleware**: CORS, request tracing and JSON content negotiation
//!
//! # Architecture
//!
//! Features are vertical slices split into **commands** (writes) and
//! **queries** (reads), each a plain async `handle` function with its own
//! error type. Routes translate those errors into HTTP responses.
//!
//! # Example
//!
//! ```no_run
//! use swimrec_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod store;

// Re-export commonly used types
pub use error::{ServerError, ServerResult};
