//! HTTP surface for pagetext: one `GET /get-text/` endpoint that returns the
//! visible text of the page named by the `url` query parameter.

use std::sync::Arc;

use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod models;
pub mod settings;
pub mod state;

pub use error::ApiError;
pub use settings::{Overrides, Settings};
pub use state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/get-text/", axum::routing::get(handlers::text::get_text))
        .route("/get-text", axum::routing::get(handlers::text::get_text))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
