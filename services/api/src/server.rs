use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionStore, LoggingCallToActionHandler, SessionBackend};
use crate::routes::with_qualification_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lead_qualifier::config::{AppConfig, QualificationSettings};
use lead_qualifier::error::AppError;
use lead_qualifier::telemetry;
use lead_qualifier::workflows::qualification::{FileSessionStore, QualificationService};
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
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = session_backend(&config.qualification);
    info!(sessions = %store.describe(), "session store selected");
    let qualification_service = Arc::new(QualificationService::new(
        Arc::new(store),
        Arc::new(LoggingCallToActionHandler::default()),
        config.qualification.clone(),
    ));

    let app = with_qualification_routes(qualification_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lead qualification service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn session_backend(settings: &QualificationSettings) -> SessionBackend {
    match &settings.session_dir {
        Some(dir) => SessionBackend::File(FileSessionStore::new(dir, &settings.session_namespace)),
        None => SessionBackend::Memory(InMemorySessionStore::default()),
    }
}
