//! Credential store abstraction and its implementations

use async_trait::async_trait;
use common::error::DatabaseError;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewUser, User};

#[cfg(test)]
pub mod memory;
pub mod user;

pub use user::UserRepository;

/// Errors raised by a credential store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The username is already taken
    #[error("username `{0}` is already registered")]
    DuplicateUsername(String),

    /// The backing store failed; callers may retry
    #[error(transparent)]
    Backend(#[from] DatabaseError),
}

/// Persistent table of user identity/secret pairs
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user; fails with `DuplicateUsername` if the name is taken
    async fn create(&self, new_user: &NewUser) -> Result<User, StoreError>;

    /// Find a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// All users ordered by username
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Whether the store is reachable
    async fn health_check(&self) -> Result<bool, StoreError>;
}
