//! HTTP client for the authentication service

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Failure talking to the authentication service
#[derive(Error, Debug)]
pub enum ClientError {
    /// The service rejected the input (400)
    #[error("{0}")]
    Rejected(String),

    /// Bad credentials or missing/expired session token (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Username already registered (409)
    #[error("{0}")]
    Conflict(String),

    /// The service could not be reached or reported itself unavailable
    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),

    /// Any other answer
    #[error("Unexpected response from authentication service ({status}): {message}")]
    Unexpected { status: u16, message: String },
}

impl ClientError {
    /// Status code to answer the browser with
    pub fn status(&self) -> StatusCode {
        match self {
            ClientError::Rejected(_) => StatusCode::BAD_REQUEST,
            ClientError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ClientError::Conflict(_) => StatusCode::CONFLICT,
            ClientError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ClientError::Unexpected { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message safe to show to the user
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Rejected(msg)
            | ClientError::Unauthorized(msg)
            | ClientError::Conflict(msg) => msg.clone(),
            ClientError::Unavailable(_) | ClientError::Unexpected { .. } => {
                "The authentication service is unavailable, please try again later".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Unavailable(err.to_string())
    }
}

/// Session token returned by a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginGrant {
    pub token: String,
    pub expires_in: u64,
}

/// One row of the data view
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub username: String,
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the authentication service
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    data_path: String,
}

impl AuthClient {
    /// Create a new client
    pub fn new(base_url: impl Into<String>, data_path: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            data_path: data_path.into(),
        }
    }

    /// Register a new user
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/register", self.base_url))
            .json(&CredentialsBody { username, password })
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Log in and obtain a session token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginGrant, ClientError> {
        let response = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&CredentialsBody { username, password })
            .send()
            .await?;

        let grant = check(response).await?.json::<LoginGrant>().await?;
        Ok(grant)
    }

    /// Fetch the rows of the data view with the session token attached
    pub async fn fetch_rows(&self, token: &str) -> Result<Vec<UserRow>, ClientError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, self.data_path))
            .bearer_auth(token)
            .send()
            .await?;

        let rows = check(response).await?.json::<Vec<UserRow>>().await?;
        Ok(rows)
    }
}

/// Pass successful responses through, classify the rest
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let bytes = response.bytes().await.unwrap_or_default();
    let message = serde_json::from_slice::<ErrorBody>(&bytes)
        .map(|body| body.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    Err(match status.as_u16() {
        400 => ClientError::Rejected(message),
        401 => ClientError::Unauthorized(message),
        409 => ClientError::Conflict(message),
        503 => ClientError::Unavailable(message),
        code => {
            error!("Authentication service answered {}: {}", code, message);
            ClientError::Unexpected {
                status: code,
                message,
            }
        }
    })
}
