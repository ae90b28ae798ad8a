use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_candidate_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use careerforge::candidates::{CandidateBrowser, DatasetCache};
use careerforge::config::AppConfig;
use careerforge::error::AppError;
use careerforge::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(dataset) = args.dataset.take() {
        config.dataset.path = dataset;
    }
    if let Some(page_size) = args.page_size.take() {
        config.dataset.page_size = usize::from(page_size);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let browser = Arc::new(
        CandidateBrowser::new(DatasetCache::global(), config.dataset.path.clone())
            .with_page_size(config.dataset.page_size),
    );
    // Fail fast on an unreadable export instead of on the first search.
    let dataset = browser.dataset()?;

    let app = with_candidate_routes(browser)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        dataset = dataset.origin(),
        candidates = dataset.len(),
        loaded_at = %dataset.loaded_at(),
        page_size = config.dataset.page_size,
        "candidate browser ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
