//! Shared utilities and types for feature modules
//!
//! # Contents
//!
//! - **pagination**: page/limit parsing and the pagination response block
//! - **links**: hypermedia link builders
//! - **validation**: JSON body field validation
//! - **test_helpers**: record fixtures (test-only)

pub mod links;
pub mod pagination;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use links::{build_link, parse_query, Link, PageLink, QueryPairs, ResourceUrls};
pub use pagination::{PaginationMetadata, PaginationParams};
pub use validation::{FieldError, JsonObject};
