// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod http_error;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tourdesk_domain::{SystemClock, Tz, parse_timezone};
use tourdesk_persistence::{BackendMode, DocumentStore, StoreConfig, open_store};
use tracing::{info, warn};

use crate::routes::{AppState, build_router};

/// Tourdesk Server - HTTP server for the tourism administration dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Serve an in-memory demo dataset instead of a database
    #[arg(long)]
    simulate: bool,

    /// Default IANA timezone for the calendar
    #[arg(long, default_value = "UTC")]
    timezone: String,
}

impl Args {
    fn store_config(&self) -> StoreConfig {
        StoreConfig {
            mode: if self.simulate {
                BackendMode::Simulated
            } else {
                BackendMode::Live
            },
            database_path: self.database.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Tourdesk server");

    let timezone: Tz = parse_timezone(&args.timezone)?;
    if args.simulate && args.database.is_some() {
        warn!("--database is ignored in simulated mode");
    }

    let store: Box<dyn DocumentStore> = open_store(&args.store_config())?;
    let app_state: AppState =
        AppState::new(store, Arc::new(SystemClock), timezone.name().to_string());

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!(%addr, %timezone, "Server listening");

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
