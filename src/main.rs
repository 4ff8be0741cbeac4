//! Sansu · Arithmetic Quiz Backend
//!
//! - Procedural arithmetic questions (forward, fill-in-the-blank, mixed, three-term)
//! - Difficulty scoring with creature reward tiers
//! - Axum HTTP + WebSocket API over in-memory quiz sessions
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT             : u16 (default 3000)
//!   QUIZ_CONFIG_PATH : path to TOML config (settings + extra presets)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"
//!   STATIC_DIR       : frontend directory (default ./static)

mod arith;
mod config;
mod domain;
mod error;
mod logic;
mod presets;
mod protocol;
mod routes;
mod session;
mod state;
mod telemetry;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (session store, presets, settings).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "sansu_backend", %addr, presets = state.presets.len(), "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
