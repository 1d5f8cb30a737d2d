//! Feature modules implementing the swimrec API
//!
//! Each feature is organized as a vertical slice with its own commands,
//! queries and routes.
//!
//! # Features
//!
//! - **records**: CRUD, listing and favorites for swim records
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (create, update, delete)
//! - `queries/` - Read operations (get, list)
//! - `routes.rs` - HTTP route definitions
//! - `types.rs` - Response views

pub mod records;
pub mod shared;

use axum::Router;

use crate::features::shared::ResourceUrls;
use crate::store::DynRecordStore;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Record storage backend
    pub store: DynRecordStore,
    /// Absolute URLs used in hypermedia links
    pub urls: ResourceUrls,
}

/// Creates the router with all feature routes mounted
///
/// - `/records` - Swim records
pub fn router(state: FeatureState) -> Router<()> {
    let records_state = records::RecordsState {
        store: state.store,
        urls: state.urls,
    };

    Router::new().nest("/records", records::records_routes().with_state(records_state))
}
