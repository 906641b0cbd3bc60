use std::net::SocketAddr;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fare_server::fare::TariffConfig;
use fare_server::reference::MemoryReference;
use fare_server::web::{AppState, create_router};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

fn init_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fare_server=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();

    let data_dir = std::env::var("FARE_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let bind_addr = std::env::var("FARE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

    let mut config = TariffConfig::default();
    if let Ok(tax) = std::env::var("FARE_TAX_PERCENT") {
        match tax.parse() {
            Ok(tax) => config = config.with_tax_percent(tax),
            Err(e) => {
                error!(value = %tax, error = %e, "Invalid FARE_TAX_PERCENT");
                return ExitCode::FAILURE;
            }
        }
    }

    let addr: SocketAddr = match bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(value = %bind_addr, error = %e, "Invalid FARE_BIND_ADDR");
            return ExitCode::FAILURE;
        }
    };

    // Reference data is loaded once; a broken data set stops startup.
    let reference = match MemoryReference::load_dir(&data_dir) {
        Ok(reference) => reference,
        Err(e) => {
            error!(dir = %data_dir, error = %e, "Failed to load reference data");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(reference, config);
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, "Fare server listening");
    info!("  GET  /health               - Health check");
    info!("  GET  /api/stations/search  - Search stations by name");
    info!("  POST /fare                 - Price a route");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
