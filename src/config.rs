//! Configuration management for the club leaderboard API.
//!
//! This module provides the configuration system, supporting:
//! - Command-line arguments via clap
//! - Environment variables (also read from a `.env` file at startup)
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use club_leaderboard_api::config::Config;
//!
//! let config = Config::parse();
//! config.validate()?;
//!
//! let database = config.database()?;
//! println!("Listening on {}", config.bind_address());
//! ```
//!
//! # Environment Variables
//!
//! - `HOST` - Server bind address (default: 0.0.0.0)
//! - `PORT` - Server port (default: 5000)
//! - `DB_HOST` - PostgreSQL host (required)
//! - `DB_NAME` - Database name (required)
//! - `DB_USER` - Database user (required)
//! - `DB_PASSWORD` - Database password (required)
//! - `DB_PORT` - Database port (default: 5432)
//! - `DB_SSL_MODE` - TLS mode for the database connection (default: require)
//! - `DB_CONNECT_TIMEOUT_SECS` - Optional connect timeout in seconds
//! - `CORS_ORIGINS` - Comma-separated allowed origins (default: any)

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use sqlx::postgres::PgSslMode;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default PostgreSQL port.
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Default TLS mode. The hosted database only accepts encrypted connections.
pub const DEFAULT_SSL_MODE: &str = "require";

// =============================================================================
// Secrets
// =============================================================================

/// A password that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw password, for handing to the database driver only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Password {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// Club Leaderboard API - member leaderboard and point lookups.
///
/// Serves the top members by points and per-member point lookups from a
/// PostgreSQL `members` table as JSON.
#[derive(Parser, Debug, Clone)]
#[command(name = "club-leaderboard-api")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    // =========================================================================
    // Database Configuration
    // =========================================================================
    /// PostgreSQL host name.
    #[arg(long, env = "DB_HOST")]
    pub db_host: String,

    /// Database name.
    #[arg(long, env = "DB_NAME")]
    pub db_name: String,

    /// Database user.
    #[arg(long, env = "DB_USER")]
    pub db_user: String,

    /// Database password.
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Password,

    /// Database port.
    #[arg(long, default_value_t = DEFAULT_DB_PORT, env = "DB_PORT")]
    pub db_port: u16,

    /// TLS mode for the database connection (disable, prefer, require,
    /// verify-ca, verify-full).
    ///
    /// Only relax this for a local development database.
    #[arg(long, default_value = DEFAULT_SSL_MODE, env = "DB_SSL_MODE")]
    pub db_ssl_mode: String,

    /// Give up connecting to the database after this many seconds.
    ///
    /// If not specified, connection attempts are not bounded.
    #[arg(long, env = "DB_CONNECT_TIMEOUT_SECS")]
    pub db_connect_timeout_secs: Option<u64>,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.db_host.trim().is_empty() {
            return Err("Database host is required. Set --db-host or DB_HOST".to_string());
        }
        if self.db_name.trim().is_empty() {
            return Err("Database name is required. Set --db-name or DB_NAME".to_string());
        }
        if self.db_user.trim().is_empty() {
            return Err("Database user is required. Set --db-user or DB_USER".to_string());
        }
        if self.db_password.is_empty() {
            return Err(
                "Database password is required. Set --db-password or DB_PASSWORD".to_string(),
            );
        }
        if self.db_port == 0 {
            return Err("db_port must be greater than 0".to_string());
        }
        if self.db_connect_timeout_secs == Some(0) {
            return Err("db_connect_timeout_secs must be greater than 0".to_string());
        }

        parse_ssl_mode(&self.db_ssl_mode)?;

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the database settings handed to the connection provider.
    pub fn database(&self) -> Result<DatabaseConfig, String> {
        Ok(DatabaseConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            name: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone(),
            ssl_mode: parse_ssl_mode(&self.db_ssl_mode)?,
            connect_timeout: self.db_connect_timeout_secs.map(Duration::from_secs),
        })
    }
}

fn parse_ssl_mode(value: &str) -> Result<PgSslMode, String> {
    value.parse::<PgSslMode>().map_err(|_| {
        format!(
            "Invalid db_ssl_mode '{}': expected one of disable, allow, prefer, require, verify-ca, verify-full",
            value
        )
    })
}

// =============================================================================
// Database Settings
// =============================================================================

/// Connection settings for the member store.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: Password,
    pub ssl_mode: PgSslMode,
    pub connect_timeout: Option<Duration>,
}

// =============================================================================
// Tests
// =============================================================================
