//! Registration and login logic

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{AuthError, AuthResult},
    jwt::JwtService,
    models::{Credentials, NewUser, User, UserSummary},
    password,
    repositories::UserStore,
    validation::{validate_password, validate_username},
};

/// Token handed out by a successful login
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

/// Authentication service over a credential store
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    jwt_service: JwtService,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(store: Arc<dyn UserStore>, jwt_service: JwtService) -> Self {
        Self { store, jwt_service }
    }

    /// Register a new user
    pub async fn register(&self, credentials: Credentials) -> AuthResult<User> {
        validate(&credentials)?;

        let Credentials { username, password } = credentials;
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(format!("failed to hash password: {}", e)))?;

        let user = self
            .store
            .create(&NewUser {
                username,
                password_hash,
            })
            .await?;

        info!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    /// Verify credentials and mint a session token
    pub async fn login(&self, credentials: Credentials) -> AuthResult<IssuedToken> {
        validate(&credentials)?;

        let user = self.store.find_by_username(&credentials.username).await?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let password = credentials.password;
        let matches = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => password::verify_password(&password, &hash),
            None => {
                let _ = password::verify_password(&password, password::dummy_hash());
                Ok(false)
            }
        })
        .await
        .map_err(|e| AuthError::Internal(format!("verification task failed: {}", e)))?
        .map_err(|e| {
            AuthError::Internal(format!(
                "stored hash for {} is invalid: {}",
                credentials.username, e
            ))
        })?;

        let Some(user) = user.filter(|_| matches) else {
            warn!("Login failed for user: {}", credentials.username);
            return Err(AuthError::Authentication);
        };

        let token = self
            .jwt_service
            .generate_token(user.id)
            .map_err(|e| AuthError::Internal(format!("failed to sign token: {}", e)))?;

        info!("User {} logged in", user.username);
        Ok(IssuedToken {
            token,
            expires_in: self.jwt_service.token_expiry(),
        })
    }

    /// All users, without password material
    pub async fn list_users(&self) -> AuthResult<Vec<UserSummary>> {
        let users = self.store.list().await?;
        Ok(users.iter().map(UserSummary::from).collect())
    }

    /// Look up the user a token was issued to
    pub async fn current_user(&self, id: Uuid) -> AuthResult<UserSummary> {
        self.store
            .find_by_id(id)
            .await?
            .map(|user| UserSummary::from(&user))
            .ok_or(AuthError::Authentication)
    }

    /// Whether the credential store is reachable
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await.unwrap_or(false)
    }
}

fn validate(credentials: &Credentials) -> AuthResult<()> {
    validate_username(&credentials.username).map_err(AuthError::Validation)?;
    validate_password(&credentials.password).map_err(AuthError::Validation)?;
    Ok(())
}
