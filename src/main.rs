use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use comedor_billing::api::{AppState, create_router};
use comedor_billing::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/comedor";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        std::env::var("COMEDOR_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;

    // Each request re-checks; this only surfaces the problem early
    if let Err(err) = config.snapshot() {
        warn!(
            error = %err,
            "No usable discount configuration; billing requests will be rejected"
        );
    }

    info!(
        config_dir = %config_dir,
        holidays = config.holidays().len(),
        "Loaded billing configuration"
    );

    let app = create_router(AppState::new(config));

    let addr: SocketAddr = std::env::var("COMEDOR_BIND")
        .unwrap_or_else(|_| DEFAULT_BIND.to_string())
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
