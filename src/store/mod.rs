//! Member store access layer.
//!
//! This module owns every conversation with the relational store. It sits
//! under the member service:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             MemberService               │
//! └────────────────────┬────────────────────┘
//!                      │ acquire() / close()
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │       ConnectionProvider Trait          │
//! │  (one fresh connection per request)     │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │         PgConnectionProvider            │
//! │   (sqlx PgConnection, TLS required)     │
//! └─────────────────────────────────────────┘
//! ```

mod postgres;
mod provider;

pub use postgres::{
    PgConnectionProvider, PgMemberConnection, LEADERBOARD_QUERY, MEMBER_BY_EMAIL_QUERY,
};
pub use provider::{ConnectionProvider, MemberConnection};
