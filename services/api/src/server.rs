use crate::cli::ServeArgs;
use crate::infra::{load_directory, AppState, InMemoryProfileSource};
use crate::routes::with_directory_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use skills_directory::config::AppConfig;
use skills_directory::directory::DirectorySearchService;
use skills_directory::error::AppError;
use skills_directory::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let ServeArgs { host, port, data } = args;
    let mut config = AppConfig::load()?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    data.apply(&mut config.directory);

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let (catalog, profiles) = load_directory(&config.directory, Utc::now())?;
    let search_service = Arc::new(DirectorySearchService::new(
        Arc::new(catalog),
        Arc::new(InMemoryProfileSource::new(profiles)),
    ));

    let app = with_directory_routes(search_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "skills directory ready");

    axum::serve(listener, app).await?;
    Ok(())
}
