use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryClaimRepository};
use crate::routes::with_claim_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use claims_review::config::AppConfig;
use claims_review::error::AppError;
use claims_review::telemetry;
use claims_review::workflows::claims::ClaimReviewService;
use std::sync::atomic::Ordering;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let repository = Arc::new(InMemoryClaimRepository::default());
    let review_service = Arc::new(ClaimReviewService::new(
        repository,
        config.evaluation.clone(),
    ));

    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        evaluator: Arc::new(review_service.evaluator().clone()),
    };

    let app = with_claim_routes(review_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "claims review service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
