use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub provider: bool,
    pub avatar_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub provider: bool,
}

#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct File {
    pub id: i32,
    pub name: String,
    pub path: String,
}

/// Public URL of an uploaded file.
pub fn file_url(app_url: &str, path: &str) -> String {
    format!("{}/files/{}", app_url.trim_end_matches('/'), path)
}

#[derive(Debug, Clone, PartialEq, FromRow, serde::Serialize)]
pub struct Appointment {
    pub id: i32,
    pub user_id: i32,
    pub provider_id: i32,
    pub date: DateTime<Utc>,
    pub canceled_at: Option<DateTime<Utc>>,
}

impl Appointment {
    pub fn is_canceled(&self) -> bool {
        self.canceled_at.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub user_id: i32,
    pub provider_id: i32,
    pub date: DateTime<Utc>,
}

/// Appointment row joined with its provider and the provider's avatar.
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentWithProvider {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub provider_id: i32,
    pub provider_name: String,
    pub avatar_id: Option<i32>,
    pub avatar_path: Option<String>,
}

#[derive(Debug, Clone, FromRow, serde::Serialize)]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "user")]
    pub recipient: i32,
    pub content: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient: i32,
    pub content: String,
}
