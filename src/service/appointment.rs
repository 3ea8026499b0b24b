use chrono::{DateTime, Duration, DurationRound, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::{info, warn};

use crate::{
    db::StoreError,
    dto::{AppointmentListItem, NewAppointmentDto},
    errors::ApiError,
    models::{Appointment, NewAppointment, NewNotification},
    state::AppState,
};

use super::auth::UserAuthData;

pub const PAGE_SIZE: i64 = 20;

/// Minimum notice required to cancel a booking.
pub const CANCEL_NOTICE_HOURS: i64 = 2;

pub async fn list(
    user_auth_data: &UserAuthData,
    page: Option<i64>,
    state: &AppState,
) -> Result<Vec<AppointmentListItem>, ApiError> {
    let page = page.unwrap_or(1).max(1);
    let offset = (page - 1).saturating_mul(PAGE_SIZE);
    let rows = state
        .appointments
        .list_for_customer(user_auth_data.user_id, PAGE_SIZE, offset)
        .await?;
    Ok(rows
        .into_iter()
        .map(|row| AppointmentListItem::from_row(row, &state.config.app_url))
        .collect())
}

pub async fn create(
    user_auth_data: &UserAuthData,
    dto: NewAppointmentDto,
    now: DateTime<Utc>,
    state: &AppState,
) -> Result<Appointment, ApiError> {
    let (provider_id, date) = match (dto.provider_id, dto.date.as_deref().and_then(parse_date)) {
        (Some(provider_id), Some(date)) => (provider_id, date),
        _ => return Err(ApiError::ValidationFailed),
    };

    let provider = state
        .users
        .find_provider(provider_id)
        .await?
        .ok_or(ApiError::NotAProvider)?;

    if provider.id == user_auth_data.user_id {
        return Err(ApiError::SelfBooking);
    }

    let slot = start_of_hour(date);
    if slot < now {
        return Err(ApiError::PastDate);
    }

    if state
        .appointments
        .find_active_at(provider.id, slot)
        .await?
        .is_some()
    {
        warn!("provider #{} already booked at {}", provider.id, slot);
        return Err(ApiError::SlotUnavailable);
    }

    let customer = state
        .users
        .find_user(user_auth_data.user_id)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let notification = NewNotification {
        recipient: provider.id,
        content: format!(
            "Novo agendamento de {} para {}",
            customer.name,
            format_slot(slot)
        ),
    };
    let appointment = state
        .appointments
        .book_appointment(
            NewAppointment {
                user_id: customer.id,
                provider_id: provider.id,
                date: slot,
            },
            notification,
        )
        .await?;

    info!(
        "appointment #{} booked by user #{} with provider #{} at {}",
        appointment.id, customer.id, provider.id, slot
    );
    Ok(appointment)
}

pub async fn cancel(
    user_auth_data: &UserAuthData,
    id: i32,
    now: DateTime<Utc>,
    state: &AppState,
) -> Result<Appointment, ApiError> {
    let appointment = state
        .appointments
        .find_appointment(id)
        .await?
        .filter(|appointment| !appointment.is_canceled())
        .ok_or(ApiError::AppointmentNotFound)?;

    if appointment.user_id != user_auth_data.user_id {
        return Err(ApiError::NotAppointmentOwner);
    }

    if appointment.date - Duration::hours(CANCEL_NOTICE_HOURS) < now {
        return Err(ApiError::CancelTooLate);
    }

    let canceled = match state.appointments.cancel_appointment(id, now).await {
        Ok(appointment) => appointment,
        Err(StoreError::NotFound) => return Err(ApiError::AppointmentNotFound),
        Err(err) => return Err(err.into()),
    };
    info!("appointment #{} canceled by user #{}", id, user_auth_data.user_id);
    Ok(canceled)
}

/// Accepts RFC 3339, an ISO date-time without offset (read as UTC) or a bare date.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn start_of_hour(date: DateTime<Utc>) -> DateTime<Utc> {
    date.duration_trunc(Duration::hours(1)).unwrap_or(date)
}

/// "dia 18 de outubro, às 14:00h"
pub fn format_slot(slot: DateTime<Utc>) -> String {
    slot.format_localized("dia %d de %B, às %H:%Mh", chrono::Locale::pt_BR)
        .to_string()
}
