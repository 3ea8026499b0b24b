use std::collections::BTreeMap;

use actix_web::{error, http::StatusCode, HttpResponse};
use derive_more::{Display, Error};
use serde::Serialize;

use crate::db::StoreError;

/// Per-field validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Display, Error)]
pub enum ApiError {
    #[display(fmt = "Validation fails")]
    ValidationFailed,

    #[display(fmt = "Validation fails")]
    InvalidForm { fields: FieldErrors },

    #[display(fmt = "You can only create appointments with providers")]
    NotAProvider,

    #[display(fmt = "You can not make an appointment with yourself")]
    SelfBooking,

    #[display(fmt = "Past dates are not allowed")]
    PastDate,

    #[display(fmt = "Appointment date is not available")]
    SlotUnavailable,

    #[display(fmt = "Appointment not found")]
    AppointmentNotFound,

    #[display(fmt = "You don't have permission to cancel this appointment")]
    NotAppointmentOwner,

    #[display(fmt = "You can only cancel appointments 2 hours in advance")]
    CancelTooLate,

    #[display(fmt = "Only providers can load notifications")]
    NotificationsForbidden,

    #[display(fmt = "Notification not found")]
    NotificationNotFound,

    #[display(fmt = "User already exists")]
    UserExists,

    #[display(fmt = "User not found")]
    UserNotFound,

    #[display(fmt = "Password does not match")]
    PasswordMismatch,

    #[display(fmt = "Token not provided")]
    TokenMissing,

    #[display(fmt = "Token invalid")]
    TokenInvalid,

    #[display(fmt = "Internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a FieldErrors>,
}

impl error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let fields = match self {
            ApiError::InvalidForm { fields } => Some(fields),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            fields,
        })
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::ValidationFailed
            | ApiError::InvalidForm { .. }
            | ApiError::PastDate
            | ApiError::SlotUnavailable
            | ApiError::UserExists => StatusCode::BAD_REQUEST,
            ApiError::NotAProvider
            | ApiError::SelfBooking
            | ApiError::NotAppointmentOwner
            | ApiError::CancelTooLate
            | ApiError::NotificationsForbidden
            | ApiError::UserNotFound
            | ApiError::PasswordMismatch
            | ApiError::TokenMissing
            | ApiError::TokenInvalid => StatusCode::UNAUTHORIZED,
            ApiError::AppointmentNotFound | ApiError::NotificationNotFound => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SlotTaken => ApiError::SlotUnavailable,
            StoreError::EmailTaken => ApiError::UserExists,
            StoreError::NotFound => ApiError::Internal,
            StoreError::Database(err) => {
                log::error!("database failure: {}", err);
                ApiError::Internal
            }
        }
    }
}
