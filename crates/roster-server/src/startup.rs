//! Server startup utilities.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use roster_config::{AppConfig, ObservabilityConfig};
use roster_core::{init_telemetry, RosterError, RosterResult, TelemetryConfig};
use tokio::signal;
use tracing::{info, warn};

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____             __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/
    "#);
}

/// Prints the endpoints the server exposes.
pub fn print_startup_info(config: &AppConfig) {
    let base = format!("http://{}", config.server.addr());
    let separator = "=".repeat(60);

    info!("{}", separator);
    info!("JSON API:  {}/api/v1/users", base);
    if config.ssr.enabled {
        info!("Web:       {}/users", base);
    }
    info!("Health:    {}/health", base);
    if config.server.swagger_enabled {
        info!("API Docs:  {}/swagger-ui", base);
    }
    if config.observability.metrics_enabled {
        info!("Metrics:   {}{}", base, config.observability.metrics_path);
    }
    info!("{}", separator);
}

/// Maps observability settings onto the tracing setup.
pub fn telemetry_config(service_name: &str, observability: &ObservabilityConfig) -> TelemetryConfig {
    TelemetryConfig {
        enabled: observability.tracing_enabled,
        service_name: service_name.to_string(),
        otlp_endpoint: observability.otlp_endpoint.clone(),
        sampling_ratio: observability.sampling_ratio,
        json_logs: observability.json_logs(),
        log_filter: Some(observability.log_level.clone()),
    }
}

/// Installs the tracing subscriber.
pub fn init_logging(service_name: &str, observability: &ObservabilityConfig) -> RosterResult<()> {
    init_telemetry(&telemetry_config(service_name, observability))
}

/// Installs the global Prometheus recorder and describes the listing metrics.
pub fn install_metrics_recorder() -> RosterResult<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| RosterError::Internal(format!("Failed to install metrics recorder: {}", e)))?;

    roster_service::metrics::register_metrics();
    Ok(handle)
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
