use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    models::{file_url, AppointmentWithProvider, User},
    service::signup::SignUpForm,
};

#[derive(Debug, Deserialize, Clone)]
pub struct NewUserDto {
    #[serde(flatten)]
    pub form: SignUpForm,
    #[serde(default)]
    pub provider: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub provider: bool,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            provider: user.provider,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoginUserRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: UserDto,
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub user_id: i32,
    pub name: String,
    pub exp: usize,
}

impl Claims {
    pub fn new(user_id: i32, name: &str, exp: usize) -> Self {
        Self {
            user_id,
            name: name.to_string(),
            exp,
        }
    }
}

/// Booking request body. Fields stay optional so that absence is reported
/// as a validation failure rather than a deserialization error.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct NewAppointmentDto {
    pub provider_id: Option<i32>,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PageQuery {
    pub page: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AvatarDto {
    pub id: i32,
    pub path: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderDto {
    pub id: i32,
    pub name: String,
    pub avatar: Option<AvatarDto>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppointmentListItem {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub provider: ProviderDto,
}

impl AppointmentListItem {
    pub fn from_row(row: AppointmentWithProvider, app_url: &str) -> Self {
        let avatar = match (row.avatar_id, row.avatar_path) {
            (Some(id), Some(path)) => Some(AvatarDto {
                id,
                url: file_url(app_url, &path),
                path,
            }),
            _ => None,
        };
        Self {
            id: row.id,
            date: row.date,
            provider: ProviderDto {
                id: row.provider_id,
                name: row.provider_name,
                avatar,
            },
        }
    }
}
