//! Settings for the web front end

use anyhow::Result;
use std::net::SocketAddr;

/// Web front end configuration
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Address to bind to
    pub bind_address: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the authentication service
    pub auth_service_url: String,
    /// Path of the collection rendered by the data view
    pub data_path: String,
    /// Mark session cookies `Secure` (requires HTTPS in front)
    pub cookie_secure: bool,
}

impl WebConfig {
    /// Create a new WebConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDRESS`: Interface to bind (default: "0.0.0.0")
    /// - `WEB_PORT`: Listening port (default: 3000)
    /// - `AUTH_SERVICE_URL`: Authentication service base URL (default: "http://localhost:5000")
    /// - `DATA_PATH`: Data endpoint path (default: "/users")
    /// - `COOKIE_SECURE`: "true"/"1" to set the `Secure` cookie attribute (default: false)
    pub fn from_env() -> Result<Self> {
        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match std::env::var("WEB_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("WEB_PORT is not a valid port: {}", raw))?,
            Err(_) => 3000,
        };

        let auth_service_url = std::env::var("AUTH_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string())
            .trim_end_matches('/')
            .to_string();

        let data_path = std::env::var("DATA_PATH").unwrap_or_else(|_| "/users".to_string());
        let data_path = if data_path.starts_with('/') {
            data_path
        } else {
            format!("/{}", data_path)
        };

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);

        Ok(WebConfig {
            bind_address,
            port,
            auth_service_url,
            data_path,
            cookie_secure,
        })
    }

    /// Socket address to listen on
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind_address, self.port).parse()?;
        Ok(addr)
    }
}
