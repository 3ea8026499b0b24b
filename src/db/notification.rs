use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgConnection;
use uuid::Uuid;

use super::{NotificationStore, PgStore, StoreError};
use crate::models::{NewNotification, Notification};

/// Inserts an unread notification on `conn`, so it can share a transaction
/// with the write that triggered it.
pub(super) async fn insert(
    conn: &mut PgConnection,
    new: &NewNotification,
) -> Result<Notification, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "INSERT INTO notifications (id, recipient, content, read, created_at)
         VALUES ($1, $2, $3, FALSE, $4)
         RETURNING id, recipient, content, read, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(new.recipient)
    .bind(&new.content)
    .bind(Utc::now())
    .fetch_one(conn)
    .await
}

#[async_trait]
impl NotificationStore for PgStore {
    async fn list_notifications(
        &self,
        recipient: i32,
        limit: i64,
    ) -> Result<Vec<Notification>, StoreError> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT id, recipient, content, read, created_at FROM notifications
             WHERE recipient = $1
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(recipient)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    async fn mark_read(&self, id: Uuid, recipient: i32) -> Result<Option<Notification>, StoreError> {
        let notification = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET read = TRUE
             WHERE id = $1 AND recipient = $2
             RETURNING id, recipient, content, read, created_at",
        )
        .bind(id)
        .bind(recipient)
        .fetch_optional(&self.pool)
        .await?;
        Ok(notification)
    }
}
