use uuid::Uuid;

use crate::{errors::ApiError, models::Notification, state::AppState};

use super::auth::UserAuthData;

pub const NOTIFICATION_LIMIT: i64 = 20;

pub async fn list(
    user_auth_data: &UserAuthData,
    state: &AppState,
) -> Result<Vec<Notification>, ApiError> {
    state
        .users
        .find_provider(user_auth_data.user_id)
        .await?
        .ok_or(ApiError::NotificationsForbidden)?;

    let notifications = state
        .notifications
        .list_notifications(user_auth_data.user_id, NOTIFICATION_LIMIT)
        .await?;
    Ok(notifications)
}

pub async fn mark_read(
    user_auth_data: &UserAuthData,
    id: Uuid,
    state: &AppState,
) -> Result<Notification, ApiError> {
    state
        .notifications
        .mark_read(id, user_auth_data.user_id)
        .await?
        .ok_or(ApiError::NotificationNotFound)
}
