use axum::{Router, routing::get};
use configuration::{Settings, WebSettings};
use database::DbRepository;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod render;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
}

/// Builds the application router. Split from `run_server` so tests can drive
/// it without a socket.
pub fn build_router(state: AppState, web: &WebSettings) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/season", get(handlers::season))
        .route("/api/season.json", get(handlers::season_json))
        .nest_service("/static", ServeDir::new(&web.static_dir))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Opens the results store and serves until Ctrl-C, then closes the store.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;

    // A store that cannot be opened is fatal.
    let db_pool = database::connect(&settings.database).await?;
    let db_repo = DbRepository::new(db_pool.clone());
    let app = build_router(AppState { db_repo }, &settings.web);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database::close(&db_pool).await;
    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        return;
    }
    tracing::info!("Shutdown signal received.");
}
