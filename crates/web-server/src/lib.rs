use axum::{
    extract::DefaultBodyLimit,
    http::HeaderName,
    routing::{get, post},
    Router,
};
use configuration::Config;
use database::{DbRepository, SalesRepository};
use reporting::{ReportSettings, SalesReporter};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod owner;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub reporter: SalesReporter,
    /// The header carrying the authenticated owner's id.
    pub owner_header: HeaderName,
}

impl AppState {
    pub fn new(reporter: SalesReporter, owner_header: &str) -> anyhow::Result<Self> {
        let owner_header = HeaderName::try_from(owner_header.to_ascii_lowercase())
            .map_err(|e| anyhow::anyhow!("invalid owner header '{}': {}", owner_header, e))?;
        Ok(Self {
            reporter,
            owner_header,
        })
    }
}

/// Builds the API router. Kept separate from `run_server` so tests can drive it directly.
pub fn build_router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/sales/upload", post(handlers::upload_sales))
        .route(
            "/api/sales",
            get(handlers::list_sales).delete(handlers::clear_sales),
        )
        .route("/api/forecast", get(handlers::get_forecast))
        .route("/api/forecast/export.csv", get(handlers::export_forecast_csv))
        .route("/api/insights", get(handlers::get_insights))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// Connects to the database and serves the API until the process is stopped.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let db_pool = database::connect(&config.database).await?;
    database::run_migrations(&db_pool).await?;
    let db_repo = Arc::new(DbRepository::new(db_pool));

    if config.database.clear_on_start {
        let deleted = db_repo.clear_all().await?;
        tracing::warn!(deleted, "clear_on_start is set; removed all stored sales");
    }

    let reporter = SalesReporter::new(db_repo, ReportSettings::from_config(&config));
    let state = Arc::new(AppState::new(reporter, &config.server.owner_header)?);
    let app = build_router(state, config.server.body_limit_mb * 1024 * 1024);

    let host: IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server started and listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
