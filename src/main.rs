// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::Result;
use clap::Parser;
use otcdns::constants::{DEFAULT_GROUP_NAME, DEFAULT_LISTEN_ADDR};
use otcdns::server::{build_router, AppState};
use otcdns::solver::{OtcDnsSolver, Solver};
use std::sync::Arc;
use tracing::{debug, info};

/// ACME DNS-01 webhook solver for Open Telekom Cloud DNS
#[derive(Debug, Parser)]
#[command(name = "otcdns", version, about)]
struct Args {
    /// API group the webhook is registered under
    #[arg(long, env = "GROUP_NAME", default_value = DEFAULT_GROUP_NAME)]
    group_name: String,

    /// Address the webhook listens on
    #[arg(long, env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    listen: String,
}

fn main() -> Result<()> {
    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .thread_name("otcdns-webhook")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Initialize logging with custom format
    //
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Example: RUST_LOG=debug cargo run
    //
    // Respects RUST_LOG_FORMAT environment variable for output format
    // Example: RUST_LOG_FORMAT=json cargo run
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    let args = Args::parse();
    if args.group_name.is_empty() {
        anyhow::bail!("GROUP_NAME must not be empty");
    }

    info!(group = %args.group_name, "Starting otcdns webhook solver");

    // Initialize Kubernetes client
    debug!("Initializing Kubernetes client");
    let client = kube::Client::try_default().await?;
    debug!("Kubernetes client initialized successfully");

    let solver = OtcDnsSolver::new(client);
    info!(solver = solver.name(), "Solver registered");

    let state = Arc::new(AppState {
        solver: Arc::new(solver),
        group_name: args.group_name,
    });

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    info!(listen = %args.listen, "Webhook server listening");

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
