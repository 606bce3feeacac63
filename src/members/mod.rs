//! Member leaderboard and point lookup.
//!
//! # Components
//!
//! - [`MemberService`]: runs the leaderboard and lookup queries, one
//!   connection per call
//! - [`Member`]: a row of the `members` table
//! - [`RankedMember`]: the columns a leaderboard row is read with
//! - [`LeaderboardEntry`]: leaderboard row as served (`_id`, `name`, `points`)
//! - [`MemberPoints`]: lookup result, including the not-found sentinel

mod model;
mod service;

pub use model::{
    LeaderboardEntry, Member, MemberPoints, RankedMember, NOT_FOUND_MESSAGE, NOT_FOUND_NAME,
};
pub use service::{normalize_email, MemberService, LEADERBOARD_LIMIT};
