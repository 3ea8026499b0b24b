use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{
    is_unique_violation, notification::insert as insert_notification, AppointmentStore, PgStore,
    StoreError,
};
use crate::models::{Appointment, AppointmentWithProvider, NewAppointment, NewNotification};

const APPOINTMENT_COLUMNS: &str = "id, user_id, provider_id, date, canceled_at";

#[async_trait]
impl AppointmentStore for PgStore {
    async fn list_for_customer(
        &self,
        user_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AppointmentWithProvider>, StoreError> {
        let rows = sqlx::query_as::<_, AppointmentWithProvider>(
            r#"SELECT a.id, a.date,
                      p.id AS provider_id, p.name AS provider_name,
                      f.id AS avatar_id, f.path AS avatar_path
               FROM appointments a
               JOIN users p ON p.id = a.provider_id
               LEFT JOIN files f ON f.id = p.avatar_id
               WHERE a.user_id = $1 AND a.canceled_at IS NULL
               ORDER BY a.date ASC, a.id ASC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_active_at(
        &self,
        provider_id: i32,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments
             WHERE provider_id = $1 AND date = $2 AND canceled_at IS NULL"
        ))
        .bind(provider_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(appointment)
    }

    async fn book_appointment(
        &self,
        new: NewAppointment,
        notification: NewNotification,
    ) -> Result<Appointment, StoreError> {
        let mut tx = self.pool.begin().await?;
        let res = sqlx::query_as::<_, Appointment>(&format!(
            "INSERT INTO appointments (user_id, provider_id, date)
             VALUES ($1, $2, $3)
             RETURNING {APPOINTMENT_COLUMNS}"
        ))
        .bind(new.user_id)
        .bind(new.provider_id)
        .bind(new.date)
        .fetch_one(&mut *tx)
        .await;
        let appointment = match res {
            Ok(appointment) => appointment,
            // appointments_provider_slot_active
            Err(err) if is_unique_violation(&err) => return Err(StoreError::SlotTaken),
            Err(err) => return Err(err.into()),
        };
        insert_notification(&mut *tx, &notification).await?;
        tx.commit().await?;
        Ok(appointment)
    }

    async fn find_appointment(&self, id: i32) -> Result<Option<Appointment>, StoreError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(appointment)
    }

    async fn cancel_appointment(
        &self,
        id: i32,
        canceled_at: DateTime<Utc>,
    ) -> Result<Appointment, StoreError> {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "UPDATE appointments SET canceled_at = $2
             WHERE id = $1 AND canceled_at IS NULL
             RETURNING {APPOINTMENT_COLUMNS}"
        ))
        .bind(id)
        .bind(canceled_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(appointment)
    }
}
