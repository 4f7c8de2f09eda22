//! Application entry point for the `farmwatch-gateway` service.
//!
//! The gateway sits between the dashboard pages and the farm backend. It
//! fetches readings, actions and calibration from the backend and serves the
//! render-ready view models built by the `farmwatch` library. Startup:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Building the backend client with an explicit credential
//! - Mounting all API routes via the `routes` gateway (EMBP pattern)
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `FARM_API_URL` (**required**) – farm backend base URL
//! - `FARM_API_TOKEN` (optional) – bearer token for the backend
//! - `FARMWATCH_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `FARMWATCH_SPAN_EVENTS` (optional) – span event mode for tracing
//!
//! See `config` for the remaining knobs.
use std::env;

use axum::Router;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use anyhow::Result;

mod backend;
mod config;
mod routes;

pub use config::Config;

// Re-exported so routes/*.rs only know their parent module, not the
// sibling modules these types come from.
pub use backend::{CommandResponse, Credential, FarmBackend};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let credential = cfg.api_token.clone().map(Credential::bearer);
    let backend = FarmBackend::new(cfg.api_url.clone(), credential)?;

    let addr = cfg.bind_addr;

    // Build app from routes gateway (EMBP)
    let app: Router = routes::router(backend, cfg);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `FARMWATCH_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level controlled by `RUST_LOG`, else `FARMWATCH_LOG_LEVEL`
///
/// Called once at startup before any logging macro runs.
fn init_tracing() {
    // ---
    let span_events = match env::var("FARMWATCH_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("FARMWATCH_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},hyper=warn,reqwest=warn"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
