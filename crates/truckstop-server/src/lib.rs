//! HTTP API over the permit record store.
//!
//! Exposes name search, address search and nearest search as JSON
//! endpoints, plus a health check.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use handlers::NearestRequest;
pub use routes::{cors_layer, create_router};

use std::net::SocketAddr;
use std::sync::Arc;

use truckstop_search::{NearestSearch, TextSearch};

/// Shared state for the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    pub text: Arc<TextSearch>,
    pub nearest: Arc<NearestSearch>,
}

impl AppState {
    pub fn new(text: TextSearch, nearest: NearestSearch) -> Self {
        Self {
            text: Arc::new(text),
            nearest: Arc::new(nearest),
        }
    }
}

/// Start the web server and run until it fails.
pub async fn serve(
    state: AppState,
    host: &str,
    port: u16,
    cors_origins: &[String],
) -> anyhow::Result<()> {
    let app = create_router(state, cors_origins);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    log::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
