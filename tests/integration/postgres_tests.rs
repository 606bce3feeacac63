//! PostgreSQL tests for the connection provider and its queries.
//!
//! These need a reachable database and are ignored by default. Run with:
//!
//! ```text
//! DB_HOST=localhost DB_NAME=club_test DB_USER=postgres DB_PASSWORD=postgres \
//!     DB_SSL_MODE=disable cargo test -- --ignored
//! ```
//!
//! Each test creates and fills its own temporary `members` table, which
//! shadows any real table for the lifetime of the connection. The queries
//! then run through [`PgMemberConnection`] on that same connection.

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{Connection, PgConnection};

use club_leaderboard_api::config::{DatabaseConfig, Password};
use club_leaderboard_api::error::StoreError;
use club_leaderboard_api::members::{MemberService, LEADERBOARD_LIMIT};
use club_leaderboard_api::store::{
    ConnectionProvider, MemberConnection, PgConnectionProvider, PgMemberConnection,
};

const MEMBERS_TABLE: &str = "CREATE TEMPORARY TABLE members (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT,
    points INTEGER NOT NULL DEFAULT 0
)";

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn test_database_config() -> DatabaseConfig {
    DatabaseConfig {
        host: env_or("DB_HOST", "localhost"),
        port: env_or("DB_PORT", "5432").parse().expect("DB_PORT must be a port"),
        name: env_or("DB_NAME", "postgres"),
        user: env_or("DB_USER", "postgres"),
        password: Password::new(env_or("DB_PASSWORD", "postgres")),
        ssl_mode: env_or("DB_SSL_MODE", "disable")
            .parse::<PgSslMode>()
            .expect("DB_SSL_MODE must be a valid mode"),
        connect_timeout: None,
    }
}

async fn raw_connection() -> PgConnection {
    let config = test_database_config();
    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.name)
        .username(&config.user)
        .password(config.password.expose())
        .ssl_mode(config.ssl_mode);

    PgConnection::connect_with(&options)
        .await
        .expect("connection failed")
}

/// A connection whose session sees a temporary `members` table with `rows`.
async fn seeded_connection(rows: &[(&str, Option<&str>, i32)]) -> PgMemberConnection {
    let mut conn = raw_connection().await;

    sqlx::query(MEMBERS_TABLE)
        .execute(&mut conn)
        .await
        .expect("create table failed");

    for (name, email, points) in rows {
        sqlx::query("INSERT INTO members (name, email, points) VALUES ($1, $2, $3)")
            .bind(*name)
            .bind(*email)
            .bind(*points)
            .execute(&mut conn)
            .await
            .expect("insert failed");
    }

    PgMemberConnection::from(conn)
}

#[tokio::test]
#[ignore = "requires database"]
async fn provider_opens_and_closes_connection() {
    let provider = PgConnectionProvider::new(test_database_config());
    let conn = provider.acquire().await.expect("acquire failed");
    conn.close().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn provider_backed_service_reports_store_errors_as_results() {
    // No temporary table here: either the real table answers or the error
    // carries a SQLSTATE
    let service = MemberService::new(PgConnectionProvider::new(test_database_config()));
    match service.leaderboard().await {
        Ok(entries) => assert!(entries.len() <= LEADERBOARD_LIMIT as usize),
        Err(StoreError::Query { code, .. }) => assert!(code.is_some()),
        Err(other) => panic!("unexpected store error: {}", other),
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn top_members_limits_filters_and_orders() {
    let mut rows: Vec<(String, Option<String>, i32)> = (1..=12)
        .map(|i| (format!("Member {}", i), Some(format!("m{}@x.com", i)), i * 5))
        .collect();
    rows.push(("Zero".to_string(), Some("zero@x.com".to_string()), 0));
    rows.push(("Negative".to_string(), Some("neg@x.com".to_string()), -3));
    // Tie with Member 12 on points; inserted later so it has the higher id
    rows.push(("Late Tie".to_string(), Some("tie@x.com".to_string()), 60));

    let borrowed: Vec<(&str, Option<&str>, i32)> = rows
        .iter()
        .map(|(n, e, p)| (n.as_str(), e.as_deref(), *p))
        .collect();
    let mut conn = seeded_connection(&borrowed).await;

    let members = conn
        .top_members(LEADERBOARD_LIMIT)
        .await
        .expect("leaderboard query failed");
    conn.close().await;

    assert_eq!(members.len(), 10);
    assert!(members.iter().all(|m| m.points > 0));
    assert!(members.windows(2).all(|w| w[0].points >= w[1].points));

    let names: Vec<&str> = members.iter().take(3).map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Member 12", "Late Tie", "Member 11"]);
    assert_eq!(members[0].points, 60);
    assert_eq!(members[9].points, 20);
}

#[tokio::test]
#[ignore = "requires database"]
async fn top_members_tolerates_missing_email() {
    let mut conn = seeded_connection(&[
        ("Ada", Some("a@x.com"), 50),
        ("Cy", None, 30),
        ("Bo", Some("b@x.com"), 0),
    ])
    .await;

    let members = conn.top_members(LEADERBOARD_LIMIT).await.expect("leaderboard query failed");
    conn.close().await;

    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Ada", "Cy"]);
    assert_eq!(members[1].points, 30);
}

#[tokio::test]
#[ignore = "requires database"]
async fn find_by_email_ignores_case() {
    let mut conn = seeded_connection(&[
        ("Ada", Some("a@x.com"), 50),
        ("Bo", Some("B@X.com"), 0),
        ("Cy", None, 30),
    ])
    .await;

    let members = conn.find_by_email("b@x.COM").await.expect("lookup query failed");
    let missing = conn.find_by_email("nobody@x.com").await.expect("lookup query failed");
    conn.close().await;

    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "Bo");
    assert_eq!(members[0].email, "B@X.com");
    assert_eq!(members[0].points, 0);
    assert!(missing.is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn find_by_email_orders_duplicates_by_id() {
    let mut conn = seeded_connection(&[
        ("First Signup", Some("dup@x.com"), 40),
        ("Later Signup", Some("DUP@x.com"), 5),
    ])
    .await;

    let members = conn.find_by_email("Dup@X.com").await.expect("lookup query failed");
    conn.close().await;

    let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["First Signup", "Later Signup"]);
    assert!(members[0].id < members[1].id);
}

#[tokio::test]
#[ignore = "requires database"]
async fn server_errors_keep_sqlstate() {
    let mut raw = raw_connection().await;

    // A members table without a points column: 42703 undefined_column
    sqlx::query("CREATE TEMPORARY TABLE members (id SERIAL PRIMARY KEY, name TEXT, email TEXT)")
        .execute(&mut raw)
        .await
        .expect("create table failed");

    let mut conn = PgMemberConnection::from(raw);
    let result = conn.top_members(LEADERBOARD_LIMIT).await;
    conn.close().await;

    match result {
        Err(StoreError::Query { code, message }) => {
            assert_eq!(code.as_deref(), Some("42703"));
            assert!(message.contains("points"));
        }
        other => panic!("expected a query error, got {:?}", other),
    }
}
