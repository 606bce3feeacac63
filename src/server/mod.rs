//! HTTP server layer for the club leaderboard API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │      GET /api/leaderboard        GET /api/memberpoints          │
//! │                                                                 │
//! │  ┌──────────────────────────┐  ┌─────────────────────────────┐  │
//! │  │        handlers          │  │           routes            │  │
//! │  │ (requests, error bodies) │  │   (router, CORS, tracing)   │  │
//! │  └──────────────────────────┘  └─────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    health_handler, home_handler, leaderboard_handler, member_points_handler, AppState,
    ErrorResponse, HealthResponse, QueryPairs, EMAIL_PARAM, WELCOME_MESSAGE,
};
pub use routes::{create_router, RouterConfig};
