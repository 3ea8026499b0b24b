use async_trait::async_trait;

use super::{is_unique_violation, PgStore, StoreError, UserStore};
use crate::models::{NewUser, User};

const USER_COLUMNS: &str = "id, name, email, password_hash, provider, avatar_id";

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let res = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password_hash, provider)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.provider)
        .fetch_one(&self.pool)
        .await;
        match res {
            Ok(user) => Ok(user),
            Err(err) if is_unique_violation(&err) => Err(StoreError::EmailTaken),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_provider(&self, id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND provider = TRUE"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
