//! Record API routes
//!
//! This module wires the record commands and queries to Axum HTTP handlers.
//!
//! # Route Structure
//!
//! - `GET /records` - List records with filters and pagination
//! - `POST /records` - Create a record
//! - `GET /records/:id` - Get a single record
//! - `PUT /records/:id` - Replace text fields of a record
//! - `PATCH /records/:id` - Partially update a record
//! - `DELETE /records/:id` - Delete a record
//! - `PATCH /records/:id/favorite` - Toggle the favorite flag
//! - `OPTIONS` on each path - Advertise the allowed methods
//!
//! # Examples
//!
//! ```rust,ignore
//! use axum::Router;
//! use swimrec_server::features::records::routes::{records_routes, RecordsState};
//!
//! let app = Router::new()
//!     .nest("/records", records_routes())
//!     .with_state(RecordsState { store, urls });
//! ```

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};

use crate::api::response::ErrorResponse;
use crate::features::shared::validation::{parse_body, JsonObject};
use crate::features::shared::ResourceUrls;
use crate::middleware::content_negotiation::is_json_content_type;
use crate::store::DynRecordStore;

use super::{
    commands::{
        CreateRecordCommand, CreateRecordError, DeleteRecordCommand, DeleteRecordError,
        PatchRecordCommand, PatchRecordError, ToggleFavoriteCommand, ToggleFavoriteError,
        UpdateRecordCommand, UpdateRecordError,
    },
    queries::{GetRecordError, GetRecordQuery, ListRecordsError, ListRecordsQuery},
};

const ALLOWED_REQUEST_HEADERS: &str = "Origin,Content-Type,Accept,Authorization";

/// State shared by the record handlers
#[derive(Clone)]
pub struct RecordsState {
    pub store: DynRecordStore,
    pub urls: ResourceUrls,
}

// ============================================================================
// Router Configuration
// ============================================================================

pub fn records_routes() -> Router<RecordsState> {
    Router::new()
        .route(
            "/",
            get(list_records)
                .post(create_record)
                .options(collection_options),
        )
        .route(
            "/:id",
            get(get_record)
                .put(update_record)
                .patch(patch_record)
                .delete(delete_record)
                .options(record_options),
        )
        .route(
            "/:id/favorite",
            patch(toggle_favorite).options(favorite_options),
        )
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create a new record
///
/// # Response
///
/// - `201 Created` - Record created
/// - `400 Bad Request` - Missing field, malformed JSON or store rejection
#[tracing::instrument(skip(state, body))]
async fn create_record(
    State(state): State<RecordsState>,
    body: Bytes,
) -> Result<Response, RecordApiError> {
    let command = CreateRecordCommand::new(parse_body(&body)?);
    let view = super::commands::create::handle(state.store, command, &state.urls).await?;

    Ok((StatusCode::CREATED, Json(view)).into_response())
}

/// Replace the supplied text fields
///
/// # Response
///
/// - `200 OK` - Record updated
/// - `400 Bad Request` - Empty body, no usable field or a blank value
/// - `404 Not Found` - Unknown record
#[tracing::instrument(skip(state, body))]
async fn update_record(
    State(state): State<RecordsState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, RecordApiError> {
    let command = UpdateRecordCommand {
        id,
        body: parse_body(&body)?,
    };
    let view = super::commands::update::handle(state.store, command, &state.urls).await?;

    Ok((StatusCode::OK, Json(view)).into_response())
}

/// Partially update a record, including `favorite`
///
/// A body not declared as JSON is ignored, which makes the request empty.
#[tracing::instrument(skip(state, headers, body))]
async fn patch_record(
    State(state): State<RecordsState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, RecordApiError> {
    let body = if is_json_content_type(&headers) {
        parse_body(&body)?
    } else {
        JsonObject::new()
    };
    let command = PatchRecordCommand { id, body };
    let view = super::commands::patch::handle(state.store, command, &state.urls).await?;

    Ok((StatusCode::OK, Json(view)).into_response())
}

#[tracing::instrument(skip(state))]
async fn toggle_favorite(
    State(state): State<RecordsState>,
    Path(id): Path<String>,
) -> Result<Response, RecordApiError> {
    let command = ToggleFavoriteCommand { id };
    let view =
        super::commands::toggle_favorite::handle(state.store, command, &state.urls).await?;

    Ok((StatusCode::OK, Json(view)).into_response())
}

/// Delete a record
///
/// # Response
///
/// - `204 No Content` - Record deleted
/// - `404 Not Found` - Unknown record
#[tracing::instrument(skip(state))]
async fn delete_record(
    State(state): State<RecordsState>,
    Path(id): Path<String>,
) -> Result<Response, RecordApiError> {
    super::commands::delete::handle(state.store, DeleteRecordCommand { id }).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(skip(state))]
async fn get_record(
    State(state): State<RecordsState>,
    Path(id): Path<String>,
) -> Result<Response, RecordApiError> {
    let view = super::queries::get::handle(state.store, GetRecordQuery { id }, &state.urls).await?;

    Ok((StatusCode::OK, Json(view)).into_response())
}

/// List records
///
/// # Endpoint
///
/// `GET /records?stroke=freestyle&distance=100m&page=2&limit=10`
///
/// # Query Parameters
///
/// - `stroke`, `distance` - Exact-match filters
/// - `page` - Page number (default: 1)
/// - `limit` - Page size (default: unbounded)
#[tracing::instrument(skip(state))]
async fn list_records(
    State(state): State<RecordsState>,
    RawQuery(raw): RawQuery,
) -> Result<Response, RecordApiError> {
    let query = ListRecordsQuery::from_raw(raw.as_deref());
    let response = super::queries::list::handle(state.store, query, &state.urls).await?;

    Ok((StatusCode::OK, Json(response)).into_response())
}

// ============================================================================
// OPTIONS Handlers
// ============================================================================

fn allow(methods: &'static str) -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ALLOW, methods),
            (header::ACCESS_CONTROL_ALLOW_METHODS, methods),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_REQUEST_HEADERS),
        ],
    )
        .into_response()
}

async fn collection_options() -> Response {
    allow("GET,POST,OPTIONS")
}

async fn record_options() -> Response {
    allow("GET,PUT,DELETE,PATCH,OPTIONS")
}

async fn favorite_options() -> Response {
    allow("PATCH,OPTIONS")
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for record API endpoints
#[derive(Debug, thiserror::Error)]
enum RecordApiError {
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Create(#[from] CreateRecordError),
    #[error(transparent)]
    Update(#[from] UpdateRecordError),
    #[error(transparent)]
    Patch(#[from] PatchRecordError),
    #[error(transparent)]
    ToggleFavorite(#[from] ToggleFavoriteError),
    #[error(transparent)]
    Delete(#[from] DeleteRecordError),
    #[error(transparent)]
    Get(#[from] GetRecordError),
    #[error(transparent)]
    List(#[from] ListRecordsError),
}

impl RecordApiError {
    fn status(&self) -> StatusCode {
        use RecordApiError as E;

        match self {
            E::Update(UpdateRecordError::NotFound)
            | E::Patch(PatchRecordError::NotFound)
            | E::ToggleFavorite(ToggleFavoriteError::NotFound)
            | E::Delete(DeleteRecordError::NotFound)
            | E::Get(GetRecordError::NotFound) => StatusCode::NOT_FOUND,

            // Write failures from the store surface as client errors
            E::InvalidJson(_) | E::Create(_) | E::Update(_) | E::Patch(_) => {
                StatusCode::BAD_REQUEST
            },

            E::ToggleFavorite(ToggleFavoriteError::Store(_))
            | E::Delete(DeleteRecordError::Store(_))
            | E::Get(GetRecordError::Store(_))
            | E::List(ListRecordsError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RecordApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Record request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Record request rejected");
        }

        ErrorResponse::new(self.to_string()).with_status(status)
    }
}
