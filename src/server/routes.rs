//! Router configuration for the club leaderboard API.
//!
//! This module defines the HTTP routes and applies CORS and tracing
//! middleware.
//!
//! # Route Structure
//!
//! ```text
//! /                    - Welcome text
//! /health              - Health check
//! /api/leaderboard     - Top 10 members by points
//! /api/memberpoints    - Point lookup by email
//! ```
//!
//! # Example
//!
//! ```ignore
//! use club_leaderboard_api::members::MemberService;
//! use club_leaderboard_api::server::routes::{create_router, RouterConfig};
//! use club_leaderboard_api::store::PgConnectionProvider;
//!
//! let provider = PgConnectionProvider::new(config.database()?);
//! let router = create_router(MemberService::new(provider), RouterConfig::new());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{routing::get, Router};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    health_handler, home_handler, leaderboard_handler, member_points_handler, AppState,
};
use crate::members::MemberService;
use crate::store::ConnectionProvider;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration.
    ///
    /// By default CORS allows any origin and tracing is enabled.
    pub fn new() -> Self {
        Self {
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// All routes are public and read-only.
pub fn create_router<P>(member_service: MemberService<P>, config: RouterConfig) -> Router
where
    P: ConnectionProvider + 'static,
{
    let app_state = AppState::new(member_service);
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/api/leaderboard", get(leaderboard_handler::<P>))
        .route("/api/memberpoints", get(member_points_handler::<P>))
        .with_state(app_state)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins
                .iter()
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
