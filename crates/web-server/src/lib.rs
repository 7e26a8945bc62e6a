use analytics::TrendEngine;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use configuration::Settings;
use exporter::CsvExporter;
use std::sync::Arc;
use store::{ChartRepository, StoreLimits};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod extract;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub repo: ChartRepository,
    pub engine: TrendEngine,
    pub exporter: CsvExporter,
}

impl AppState {
    pub fn new(repo: ChartRepository) -> Self {
        Self {
            repo,
            engine: TrendEngine::new(),
            exporter: CsvExporter::new(),
        }
    }
}

/// Builds the application router with all routes and middleware attached.
pub fn build_router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/charts",
            get(handlers::list_charts).post(handlers::create_chart),
        )
        .route(
            "/api/charts/:chart_id",
            get(handlers::get_chart)
                .put(handlers::update_chart)
                .delete(handlers::delete_chart),
        )
        .route(
            "/api/charts/:chart_id/points",
            get(handlers::list_points).post(handlers::create_point),
        )
        .route(
            "/api/charts/:chart_id/points/:point_id",
            put(handlers::update_point).delete(handlers::delete_point),
        )
        .route("/api/charts/:chart_id/trend", get(handlers::get_trend))
        .route("/api/charts/:chart_id/stats", get(handlers::get_statistics))
        .route("/api/charts/:chart_id/report", get(handlers::get_report))
        .route("/api/charts/:chart_id/export", get(handlers::export_chart))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let repo = ChartRepository::new(StoreLimits {
        max_charts_per_user: settings.limits.max_charts_per_user,
        max_points_per_chart: settings.limits.max_points_per_chart,
    });
    let app_state = Arc::new(AppState::new(repo));
    let app = build_router(app_state, settings.server.body_limit_bytes);

    let listener =
        tokio::net::TcpListener::bind((settings.server.host.as_str(), settings.server.port)).await?;
    tracing::info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
