//! Club Leaderboard API - member leaderboard and point lookups.
//!
//! This binary loads configuration, then starts the HTTP server.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use club_leaderboard_api::{
    config::Config,
    members::MemberService,
    server::{create_router, RouterConfig},
    store::{ConnectionProvider, MemberConnection, PgConnectionProvider},
};

#[tokio::main]
async fn main() -> ExitCode {
    // Missing .env is fine; real environment variables always win
    let dotenv = dotenvy::dotenv();

    let config = Config::parse();
    init_logging(config.verbose);

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    run_serve(config).await
}

// =============================================================================
// Serve
// =============================================================================

async fn run_serve(config: Config) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let database = match config.database() {
        Ok(database) => database,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Configuration:");
    info!(
        "  Database: {}@{}:{}/{}",
        database.user, database.host, database.port, database.name
    );
    info!("  TLS mode: {:?}", database.ssl_mode);
    match database.connect_timeout {
        Some(timeout) => info!("  Connect timeout: {}s", timeout.as_secs()),
        None => info!("  Connect timeout: none"),
    }
    match config.cors_origins {
        Some(ref origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS origins: any"),
    }

    let provider = PgConnectionProvider::new(database);

    // A failed startup check is not fatal: every request opens its own connection,
    // so the API starts serving as soon as the database comes up.
    info!("");
    info!("Checking database connectivity...");
    match provider.acquire().await {
        Ok(conn) => {
            conn.close().await;
            info!("  Connected successfully");
        }
        Err(e) => {
            warn!("  Database not reachable yet: {}", e);
            warn!("  Requests will return 500 until it is.");
        }
    }

    let router = create_router(MemberService::new(provider), build_router_config(&config));
    let addr = config.bind_address();

    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("    curl http://{}/api/leaderboard", addr);
    info!("    curl 'http://{}/api/memberpoints?email=<email>'", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Server stopped");
    ExitCode::SUCCESS
}

/// Resolve when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "club_leaderboard_api=debug,tower_http=debug"
    } else {
        "club_leaderboard_api=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new();

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}
