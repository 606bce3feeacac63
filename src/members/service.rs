//! Member Service for the leaderboard and point lookups.
//!
//! Each operation follows the same shape:
//!
//! ```text
//! validate input ─► acquire connection ─► run one query ─► close ─► format
//! ```
//!
//! The connection is closed before the query result is inspected, so it is
//! released on success and on every failure path alike.

use tracing::{debug, warn};

use crate::error::{ApiError, StoreError};
use crate::store::{ConnectionProvider, MemberConnection};

use super::model::{LeaderboardEntry, MemberPoints};

/// Number of members shown on the leaderboard.
pub const LEADERBOARD_LIMIT: u32 = 10;

/// Serves leaderboard and lookup requests from a connection provider.
pub struct MemberService<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> MemberService<P> {
    /// Create a new service on top of the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The top members with positive points, highest first.
    ///
    /// Returns at most [`LEADERBOARD_LIMIT`] entries. An empty table yields
    /// an empty list.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let mut conn = self.provider.acquire().await?;
        let result = conn.top_members(LEADERBOARD_LIMIT).await;
        conn.close().await;

        let members = result?;
        debug!(count = members.len(), "Fetched leaderboard");

        Ok(members.into_iter().map(LeaderboardEntry::from).collect())
    }

    /// Look up a member's points by email, ignoring case.
    ///
    /// A blank or missing email is rejected before the store is touched. An
    /// unknown email yields [`MemberPoints::not_found`], not an error.
    pub async fn member_points(&self, email: Option<&str>) -> Result<MemberPoints, ApiError> {
        let email = normalize_email(email).ok_or(ApiError::MissingEmail)?;

        let mut conn = self.provider.acquire().await?;
        let result = conn.find_by_email(&email).await;
        conn.close().await;

        let matches = result?;
        if matches.len() > 1 {
            // Lowest id wins; the rest are reported so they can be cleaned up.
            warn!(
                email = %email,
                matches = matches.len(),
                "Multiple members share this email, using the lowest id"
            );
        }

        match matches.into_iter().next() {
            Some(member) => {
                debug!(member_id = member.id, "Member found");
                Ok(MemberPoints::found(member))
            }
            None => {
                debug!(email = %email, "No member found");
                Ok(MemberPoints::not_found())
            }
        }
    }
}

/// Trim an email, treating blank input as missing.
///
/// Case is left alone; the lookup query folds both sides with `LOWER`.
pub fn normalize_email(email: Option<&str>) -> Option<String> {
    let email = email?.trim();
    if email.is_empty() {
        None
    } else {
        Some(email.to_string())
    }
}
