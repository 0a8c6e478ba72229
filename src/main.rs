//! Entry point for the wage statement server.
//!
//! The configuration directory is read from `WAGE_CONFIG_DIR` (default
//! `./config/kr_hourly`) and the bind address from `WAGE_BIND_ADDR`
//! (default `127.0.0.1:3000`). Log filtering follows `RUST_LOG`.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use wage_statement::api::{AppState, create_router};
use wage_statement::config::ConfigLoader;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::from_default_env().add_directive(
        "wage_statement=info"
            .parse()
            .unwrap_or_else(|_| tracing::Level::INFO.into()),
    );
    fmt().with_env_filter(filter).init();

    let config_dir =
        std::env::var("WAGE_CONFIG_DIR").unwrap_or_else(|_| "./config/kr_hourly".to_string());
    let addr = std::env::var("WAGE_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(addr = %addr, error = %err, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %addr, "Wage statement server listening");
    if let Err(err) = axum::serve(listener, create_router(AppState::new(config))).await {
        error!(error = %err, "Server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
