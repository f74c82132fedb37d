//! User repository for database operations

use async_trait::async_trait;
use common::error::DatabaseError;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{StoreError, UserStore};
use crate::models::{NewUser, User};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `users` table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        info!("Users table is ready");
        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, new_user: &NewUser) -> Result<User, StoreError> {
        info!("Creating new user: {}", new_user.username);

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, password
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::DuplicateUsername(new_user.username.clone())
            }
            other => DatabaseError::from_query(other).into(),
        })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        info!("Finding user by username: {}", username);

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        info!("Finding user by ID: {}", id);

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        Ok(users)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(common::database::health_check(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::database::{DatabaseConfig, init_pool};

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn test_duplicate_username_keeps_stored_hash() -> Result<(), Box<dyn std::error::Error>> {
        let pool = init_pool(&DatabaseConfig::from_env()?).await?;
        let repository = UserRepository::new(pool);

        // bootstrapping twice is a no-op
        repository.ensure_schema().await?;
        repository.ensure_schema().await?;

        let username = format!("alice_{}", Uuid::new_v4().simple());
        let created = repository
            .create(&NewUser {
                username: username.clone(),
                password_hash: "first-hash".to_string(),
            })
            .await?;

        let duplicate = repository
            .create(&NewUser {
                username: username.clone(),
                password_hash: "second-hash".to_string(),
            })
            .await;
        assert!(matches!(
            duplicate,
            Err(StoreError::DuplicateUsername(ref name)) if name == &username
        ));

        let stored = repository
            .find_by_username(&username)
            .await?
            .expect("user should exist");
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.password_hash, "first-hash");

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(created.id)
            .execute(&repository.pool)
            .await?;

        Ok(())
    }
}
