//! Connection abstraction for the member store.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::members::{Member, RankedMember};

// =============================================================================
// ConnectionProvider Trait
// =============================================================================

/// Opens one connection to the member store per call.
///
/// Implementations attempt exactly once and never retry. A failed attempt is
/// reported as [`StoreError::Connection`].
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// The connection type this provider opens.
    type Connection: MemberConnection + 'static;

    /// Open a fresh connection.
    async fn acquire(&self) -> Result<Self::Connection, StoreError>;
}

// =============================================================================
// MemberConnection Trait
// =============================================================================

/// The read queries a single connection can run against `members`.
#[async_trait]
pub trait MemberConnection: Send {
    /// Members with `points > 0`, highest points first, at most `limit` rows.
    ///
    /// Ties are ordered by `id` ascending.
    async fn top_members(&mut self, limit: u32) -> Result<Vec<RankedMember>, StoreError>;

    /// All members whose email equals `email`, ignoring case, ordered by `id`.
    ///
    /// `email` is passed through as given; the store does the case folding.
    async fn find_by_email(&mut self, email: &str) -> Result<Vec<Member>, StoreError>;

    /// Release the connection.
    ///
    /// Dropping a connection also releases it; this gives implementations a
    /// chance to shut down cleanly.
    async fn close(self);
}
