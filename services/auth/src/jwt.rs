//! JWT service for session token generation and validation
//!
//! Session tokens are HS256-signed with a shared secret and carry the user
//! ID, the issue time and the expiry. There is no server-side revocation:
//! a token stays valid until `exp`.

use anyhow::Result;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret used to sign and verify tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 1 hour)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Signing secret (required, non-empty)
    /// - `JWT_EXPIRY`: Token lifetime in seconds (default: 3600)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let token_expiry: u64 = match std::env::var("JWT_EXPIRY") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("JWT_EXPIRY is not a number of seconds: {}", raw))?,
            Err(_) => 3600, // 1 hour
        };

        if token_expiry == 0 {
            anyhow::bail!("JWT_EXPIRY must be greater than zero");
        }

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("token_expiry", &self.token_expiry)
            .finish()
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Result<Self> {
        if config.secret.is_empty() {
            anyhow::bail!("JWT secret must not be empty");
        }
        if config.token_expiry == 0 {
            anyhow::bail!("JWT token expiry must be greater than zero");
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        })
    }

    /// Generate a session token for a user
    pub fn generate_token(&self, user_id: Uuid) -> Result<String> {
        self.generate_token_at(user_id, now())
    }

    /// Generate a session token as if issued at `issued_at`
    pub(crate) fn generate_token_at(&self, user_id: Uuid, issued_at: u64) -> Result<String> {
        let exp = issued_at
            .checked_add(self.config.token_expiry)
            .ok_or_else(|| anyhow::anyhow!("Token expiry overflows the clock"))?;

        let claims = Claims {
            sub: user_id,
            iat: issued_at,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        // jsonwebtoken accepts `exp == now`; a token is only valid strictly before `exp`
        if token_data.claims.exp <= now() {
            anyhow::bail!("Token has expired");
        }

        Ok(token_data.claims)
    }

    /// Get the token expiry time
    pub fn token_expiry(&self) -> u64 {
        self.config.token_expiry
    }
}

fn now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}
