/// Web server
///
/// Serves the chat page, the JSON question endpoints and the campus map.

pub mod page;
pub mod routes;
pub mod state;

pub use state::{AppState, SharedState};

use crate::error::Result;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/ask", post(routes::ask))
        .route("/chat", post(routes::ask))
        .route("/support", post(routes::support))
        .route("/map", get(routes::map_image))
        .route("/map-image", get(routes::map_image))
        .route("/hotspots", get(routes::hotspots))
        .route("/places", get(routes::places))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped
pub async fn serve(addr: SocketAddr, state: SharedState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "campus-assist listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
