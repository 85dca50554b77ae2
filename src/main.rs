//! Reservation router shell.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │               RESERVATION ROUTER             │
//!                        │                                              │
//!   GET /reservations/X  │  ┌────────┐    ┌───────────┐    ┌─────────┐  │
//!   ─────────────────────┼─▶│  http  │───▶│navigation │───▶│ routing │  │
//!                        │  │ server │    │ (base,    │    │ (table, │  │
//!                        │  └────────┘    │  current) │    │ pattern)│  │
//!                        │       ▲        └───────────┘    └────┬────┘  │
//!   { view, params }     │       │                              │       │
//!   ◀────────────────────┼───────┴──────── RouteMatch / NotFound ◀┘      │
//!                        │                                              │
//!                        │  config (TOML, watcher) · observability ·    │
//!                        │  lifecycle (startup, signals, shutdown)      │
//!                        └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reservation-router")]
#[command(about = "Serve the reservation route table", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults when omitted.
    #[arg(short, long, env = "ROUTER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    reservation_router::lifecycle::startup::run(cli.config.as_deref()).await?;
    Ok(())
}
