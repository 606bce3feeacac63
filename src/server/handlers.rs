//! HTTP request handlers for the club leaderboard API.
//!
//! # Endpoints
//!
//! - `GET /` - Plain-text welcome message
//! - `GET /health` - Health check endpoint
//! - `GET /api/leaderboard` - Top members by points
//! - `GET /api/memberpoints?email=...` - Points for one member

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::error::{ApiError, StoreError};
use crate::members::{LeaderboardEntry, MemberPoints, MemberService};
use crate::store::ConnectionProvider;

/// Body of `GET /`.
pub const WELCOME_MESSAGE: &str =
    "Welcome to the club API! Visit /api/leaderboard for the leaderboard.";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the member service.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<P: ConnectionProvider> {
    /// The member service for leaderboard and lookup requests
    pub member_service: Arc<MemberService<P>>,
}

impl<P: ConnectionProvider> AppState<P> {
    /// Create a new application state with the given member service.
    pub fn new(member_service: MemberService<P>) -> Self {
        Self {
            member_service: Arc::new(member_service),
        }
    }
}

impl<P: ConnectionProvider> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            member_service: Arc::clone(&self.member_service),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Name of the lookup query parameter.
pub const EMAIL_PARAM: &str = "email";

/// Raw query string pairs, in request order.
///
/// Kept as a list so a repeated parameter is not a deserialization error.
pub type QueryPairs = Vec<(String, String)>;

/// The first value of `name` in the query string, if any.
pub fn first_param<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,

    /// Store-provided detail (error code or message), when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response without details.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    /// Create a new error response with details.
    pub fn with_details(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            error: error.into(),
            details,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert ApiError to HTTP response.
///
/// Client errors are logged at WARN, store failures at ERROR with the full
/// detail. Connection details never reach the client.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MissingEmail => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(self.to_string()),
            ),

            ApiError::Store(store_err) => {
                let message = match store_err {
                    StoreError::Connection(_) => "Database connection could not be established.",
                    StoreError::Query { .. } => "Database query error.",
                    StoreError::Unexpected(_) => "An unexpected error occurred.",
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details(message, store_err.client_details()),
                )
            }
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), "Server error: {}", self);
        } else {
            warn!(status = status.as_u16(), "Client error: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle requests to the root path.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler() -> &'static str {
    WELCOME_MESSAGE
}

/// Handle health check requests.
///
/// Does not touch the database.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle leaderboard requests.
///
/// # Endpoint
///
/// `GET /api/leaderboard`
///
/// # Response
///
/// `200 OK` with up to 10 members, highest points first:
/// ```json
/// [
///   { "_id": "1", "name": "Ada", "points": 50 }
/// ]
/// ```
///
/// # Errors
///
/// - `500 Internal Server Error`: Connection or query failure
pub async fn leaderboard_handler<P: ConnectionProvider>(
    State(state): State<AppState<P>>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let entries = state.member_service.leaderboard().await?;
    Ok(Json(entries))
}

/// Handle member point lookups.
///
/// # Endpoint
///
/// `GET /api/memberpoints?email={email}`
///
/// # Response
///
/// `200 OK` with `{ "name": "...", "points": 0 }` on a match. An unknown
/// email also returns `200 OK`, with the not-found payload:
/// ```json
/// { "name": "Not Found", "points": 0, "message": "No member found with this email address." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: `email` missing, blank or unreadable
/// - `500 Internal Server Error`: Connection or query failure
///
/// When `email` is repeated, the first value is used.
pub async fn member_points_handler<P: ConnectionProvider>(
    State(state): State<AppState<P>>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<MemberPoints>, ApiError> {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            warn!("Unreadable query string: {}", rejection.body_text());
            Vec::new()
        }
    };

    let points = state
        .member_service
        .member_points(first_param(&pairs, EMAIL_PARAM))
        .await?;
    Ok(Json(points))
}
