//! Web surface for tradewise.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /` | Page with the ticker field (default `AAPL`) and the action button |
//! | `POST /insight` | Form submit; redraws the page with the result |
//! | `POST /api/insight` | JSON variant, `{ "symbol": "AAPL" }` |
//! | `GET /health` | Liveness probe |

pub mod markdown;
pub mod page;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tradewise_core::TradingAssistant;

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<TradingAssistant>,
}

impl AppState {
    pub fn new(assistant: TradingAssistant) -> Self {
        Self {
            assistant: Arc::new(assistant),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/insight", post(routes::insight_page))
        .route("/api/insight", post(routes::insight_api))
        .route("/health", get(routes::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "tradewise listening");
    axum::serve(listener, create_app(state)).await
}
