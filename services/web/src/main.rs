use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod client;
mod config;
mod pages;
mod routes;
mod session;

use crate::{client::AuthClient, config::WebConfig};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub client: AuthClient,
    pub cookie_secure: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting web front end");

    let config = WebConfig::from_env()?;
    info!(
        "Using authentication service at {} (data path {})",
        config.auth_service_url, config.data_path
    );

    let app_state = AppState {
        client: AuthClient::new(config.auth_service_url.clone(), config.data_path.clone()),
        cookie_secure: config.cookie_secure,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Web front end listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
