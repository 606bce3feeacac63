//! # Club Leaderboard API
//!
//! A read-only HTTP API serving a club's member leaderboard and per-member
//! point lookups from a PostgreSQL `members` table. It is consumed by website
//! widgets, so every expected outcome (including "no such member") is a
//! `200 OK` JSON body.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`store`] - Connection provider and the SQL run against `members`
//! - [`members`] - Member service, leaderboard and lookup payloads
//! - [`server`] - Axum-based HTTP server and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - Store and API error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use clap::Parser;
//! use club_leaderboard_api::{create_router, Config, MemberService, PgConnectionProvider, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::parse();
//!     let database = config.database().expect("invalid database settings");
//!
//!     let service = MemberService::new(PgConnectionProvider::new(database));
//!     let router = create_router(service, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind_address()).await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod members;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use config::{Config, DatabaseConfig, Password};
pub use error::{ApiError, StoreError};
pub use members::{
    normalize_email, LeaderboardEntry, Member, MemberPoints, MemberService, RankedMember,
    LEADERBOARD_LIMIT, NOT_FOUND_MESSAGE, NOT_FOUND_NAME,
};
pub use server::{
    create_router, health_handler, home_handler, leaderboard_handler, member_points_handler,
    AppState, ErrorResponse, HealthResponse, RouterConfig, EMAIL_PARAM, WELCOME_MESSAGE,
};
pub use store::{ConnectionProvider, MemberConnection, PgConnectionProvider, PgMemberConnection};
