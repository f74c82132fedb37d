//! Server settings for the authentication service

use anyhow::Result;
use std::net::SocketAddr;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_address: String,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDRESS`: Interface to bind (default: "0.0.0.0")
    /// - `PORT`: Listening port (default: 5000)
    pub fn from_env() -> Result<Self> {
        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT is not a valid port: {}", raw))?,
            Err(_) => 5000,
        };

        Ok(ServerConfig { bind_address, port })
    }

    /// Socket address to listen on
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind_address, self.port).parse()?;
        Ok(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_server_config_defaults() {
        unsafe {
            std::env::remove_var("BIND_ADDRESS");
            std::env::remove_var("PORT");
        }

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:5000");
    }

    #[test]
    #[serial]
    fn test_server_config_from_env() {
        unsafe {
            std::env::set_var("BIND_ADDRESS", "127.0.0.1");
            std::env::set_var("PORT", "8081");
        }

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8081");

        unsafe {
            std::env::set_var("PORT", "eighty");
        }
        assert!(ServerConfig::from_env().is_err());

        unsafe {
            std::env::remove_var("BIND_ADDRESS");
            std::env::remove_var("PORT");
        }
    }
}
