//! PostgreSQL-backed connection provider.
//!
//! Every call to [`PgConnectionProvider::acquire`] opens a brand new
//! connection with the configured TLS mode. There is no pool.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgRow};
use sqlx::{Connection, Row};
use tracing::{debug, warn};

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::members::{Member, RankedMember};

use super::{ConnectionProvider, MemberConnection};

/// Top members by points, ties broken by id.
pub const LEADERBOARD_QUERY: &str = r#"
    SELECT id::BIGINT AS id, name, points::BIGINT AS points
    FROM members
    WHERE points > 0
    ORDER BY points DESC, id ASC
    LIMIT $1
"#;

/// Case-insensitive email match. Duplicates come back lowest id first.
pub const MEMBER_BY_EMAIL_QUERY: &str = r#"
    SELECT id::BIGINT AS id, name, email, points::BIGINT AS points
    FROM members
    WHERE LOWER(email) = LOWER($1)
    ORDER BY id ASC
"#;

// =============================================================================
// Provider
// =============================================================================

/// Opens single PostgreSQL connections on demand.
#[derive(Clone)]
pub struct PgConnectionProvider {
    config: DatabaseConfig,
    options: PgConnectOptions,
}

impl PgConnectionProvider {
    /// Create a provider for the given database settings.
    pub fn new(config: DatabaseConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(config.password.expose())
            .ssl_mode(config.ssl_mode);

        Self { config, options }
    }

    /// The settings this provider connects with.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    async fn connect(&self) -> Result<PgConnection, StoreError> {
        let connect = PgConnection::connect_with(&self.options);

        let result = match self.config.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, connect).await.map_err(|_| {
                StoreError::Connection(format!(
                    "timed out after {}s connecting to {}:{}",
                    limit.as_secs(),
                    self.config.host,
                    self.config.port
                ))
            })?,
            None => connect.await,
        };

        result.map_err(|e| StoreError::Connection(e.to_string()))
    }
}

#[async_trait]
impl ConnectionProvider for PgConnectionProvider {
    type Connection = PgMemberConnection;

    async fn acquire(&self) -> Result<Self::Connection, StoreError> {
        let conn = self.connect().await?;
        debug!(
            host = %self.config.host,
            database = %self.config.name,
            "Opened database connection"
        );
        Ok(PgMemberConnection { conn })
    }
}

// =============================================================================
// Connection
// =============================================================================

/// A single open PostgreSQL connection.
pub struct PgMemberConnection {
    conn: PgConnection,
}

/// Wrap a connection opened elsewhere, e.g. one with session-local tables.
impl From<PgConnection> for PgMemberConnection {
    fn from(conn: PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl MemberConnection for PgMemberConnection {
    async fn top_members(&mut self, limit: u32) -> Result<Vec<RankedMember>, StoreError> {
        let rows = sqlx::query(LEADERBOARD_QUERY)
            .bind(i64::from(limit))
            .fetch_all(&mut self.conn)
            .await
            .map_err(map_query_error)?;

        rows.iter().map(ranked_member_from_row).collect()
    }

    async fn find_by_email(&mut self, email: &str) -> Result<Vec<Member>, StoreError> {
        let rows = sqlx::query(MEMBER_BY_EMAIL_QUERY)
            .bind(email)
            .fetch_all(&mut self.conn)
            .await
            .map_err(map_query_error)?;

        rows.iter().map(member_from_row).collect()
    }

    async fn close(self) {
        match self.conn.close().await {
            Ok(()) => debug!("Closed database connection"),
            Err(e) => warn!("Failed to close database connection cleanly: {}", e),
        }
    }
}

fn decode_error(err: sqlx::Error) -> StoreError {
    StoreError::Unexpected(err.to_string())
}

fn ranked_member_from_row(row: &PgRow) -> Result<RankedMember, StoreError> {
    Ok(RankedMember {
        id: row.try_get("id").map_err(decode_error)?,
        name: row.try_get("name").map_err(decode_error)?,
        points: row.try_get("points").map_err(decode_error)?,
    })
}

fn member_from_row(row: &PgRow) -> Result<Member, StoreError> {
    Ok(Member {
        id: row.try_get("id").map_err(decode_error)?,
        name: row.try_get("name").map_err(decode_error)?,
        email: row.try_get("email").map_err(decode_error)?,
        points: row.try_get("points").map_err(decode_error)?,
    })
}

/// Map a failed query to the store error taxonomy.
///
/// Server-side failures keep their SQLSTATE code; decoding problems are
/// reported as unexpected.
fn map_query_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::Query {
            code: db_err.code().map(|c| c.into_owned()),
            message: db_err.message().to_string(),
        },
        decode @ (sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. }) => StoreError::Unexpected(decode.to_string()),
        other => StoreError::Query {
            code: None,
            message: other.to_string(),
        },
    }
}
