//! # Roster Server
//!
//! Main entry point: load configuration, install logging, then serve the
//! user listing until a shutdown signal arrives.

use roster_config::ConfigLoader;
use roster_core::{shutdown_telemetry, DEFAULT_LOG_FILTER};
use roster_server::{
    startup::{init_logging, print_banner},
    Application,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            init_fallback_logging();
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.app.name, &config.observability) {
        init_fallback_logging();
        error!("Failed to initialize telemetry: {}", e);
    }

    print_banner();
    info!("Version: {}", config.app.version);
    info!("Environment: {}", config.app.environment);

    let result = Application::new(config).run().await;
    shutdown_telemetry();

    if let Err(e) = result {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

fn init_fallback_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init();
}
