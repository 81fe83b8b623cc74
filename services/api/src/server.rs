use crate::cli::ServeArgs;
use crate::demo;
use crate::infra::{seed_defaults, ApiState};
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use timetable::config::AppConfig;
use timetable::error::AppError;
use timetable::scheduling::SchedulingService;
use timetable::telemetry;
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

    let service = Arc::new(SchedulingService::new());
    seed_defaults(&service)?;
    if config.seed_demo {
        demo::seed_sample_term(&service)?;
    }

    let state = ApiState {
        service,
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "course timetable service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
