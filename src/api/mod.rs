//! HTTP layer exposing recommendations and document analysis.

pub mod error;
pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{config::Settings, lexicon::Lexicon};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub lexicon: Arc<Lexicon>,
}

/// Build the router; every route answers cross-origin requests.
pub fn router(state: AppState) -> Router {
    let router = Router::new()
        .route(
            "/recommend",
            get(routes::recommend_query).post(routes::recommend_body),
        )
        .route(
            "/analyze_document",
            get(routes::analyze_query).post(routes::analyze_body),
        )
        .route("/health", get(routes::health));

    #[cfg(feature = "askama")]
    let router = router.route("/", get(crate::ui::index));

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let lexicon = Arc::new(Lexicon::load(&settings)?);
    let state = AppState { settings, lexicon };

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving genderlex API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
