//! Member records and the JSON shapes served to the front-end widgets.

use serde::{Deserialize, Serialize};

/// Name reported when a lookup matches no member.
pub const NOT_FOUND_NAME: &str = "Not Found";

/// Message attached to the not-found payload.
pub const NOT_FOUND_MESSAGE: &str = "No member found with this email address.";

/// A row of the `members` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Primary key
    pub id: i64,

    /// Display name
    pub name: String,

    /// Contact email, compared case-insensitively
    pub email: String,

    /// Current score (zero or positive)
    pub points: i64,
}

impl Member {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>, points: i64) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            points,
        }
    }
}

/// A leaderboard row as read from `members`.
///
/// Carries only the columns the leaderboard serves, so a ranked member with
/// no email on file still decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedMember {
    pub id: i64,
    pub name: String,
    pub points: i64,
}

impl RankedMember {
    pub fn new(id: i64, name: impl Into<String>, points: i64) -> Self {
        Self {
            id,
            name: name.into(),
            points,
        }
    }
}

/// One row of the leaderboard.
///
/// Website repeaters key their items by `_id`, so the identifier is carried
/// as a string under that name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub points: i64,
}

impl From<RankedMember> for LeaderboardEntry {
    fn from(member: RankedMember) -> Self {
        Self {
            id: member.id.to_string(),
            name: member.name,
            points: member.points,
        }
    }
}

/// Result of a point lookup by email.
///
/// A lookup that matches nothing is still a successful response: the
/// widgets render the sentinel instead of handling an HTTP error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPoints {
    pub name: String,
    pub points: i64,

    /// Only present on the not-found payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MemberPoints {
    /// Payload for a matched member.
    pub fn found(member: Member) -> Self {
        Self {
            name: member.name,
            points: member.points,
            message: None,
        }
    }

    /// Sentinel payload for an email with no matching member.
    pub fn not_found() -> Self {
        Self {
            name: NOT_FOUND_NAME.to_string(),
            points: 0,
            message: Some(NOT_FOUND_MESSAGE.to_string()),
        }
    }

    /// Whether this is the not-found sentinel.
    pub fn is_not_found(&self) -> bool {
        self.message.is_some()
    }
}
