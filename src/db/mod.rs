pub mod appointment;
#[cfg(test)]
pub mod memory;
pub mod notification;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use log::info;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    models::{
        Appointment, AppointmentWithProvider, NewAppointment, NewNotification, NewUser,
        Notification, User,
    },
    PGPool,
};

#[derive(Debug, Display, Error)]
pub enum StoreError {
    #[display(fmt = "provider already has an active appointment at this date")]
    SlotTaken,

    #[display(fmt = "email already registered")]
    EmailTaken,

    #[display(fmt = "row not found")]
    NotFound,

    #[display(fmt = "{}", _0)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            err => StoreError::Database(err),
        }
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn find_user(&self, id: i32) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Finds a user by id only if it is flagged as a provider.
    async fn find_provider(&self, id: i32) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Non-canceled appointments booked by `user_id`, ordered by date ascending.
    async fn list_for_customer(
        &self,
        user_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AppointmentWithProvider>, StoreError>;

    /// The non-canceled appointment holding `provider_id`'s slot at `date`, if any.
    async fn find_active_at(
        &self,
        provider_id: i32,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError>;

    /// Stores the appointment together with the provider's notification; neither
    /// is kept if either write fails. Fails with [`StoreError::SlotTaken`] when
    /// the slot already holds an active appointment.
    async fn book_appointment(
        &self,
        new: NewAppointment,
        notification: NewNotification,
    ) -> Result<Appointment, StoreError>;

    async fn find_appointment(&self, id: i32) -> Result<Option<Appointment>, StoreError>;

    async fn cancel_appointment(
        &self,
        id: i32,
        canceled_at: DateTime<Utc>,
    ) -> Result<Appointment, StoreError>;
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Latest notifications addressed to `recipient`, newest first.
    async fn list_notifications(
        &self,
        recipient: i32,
        limit: i64,
    ) -> Result<Vec<Notification>, StoreError>;

    async fn mark_read(&self, id: Uuid, recipient: i32) -> Result<Option<Notification>, StoreError>;
}

/// Postgres-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PGPool,
}

impl PgStore {
    pub fn new(pool: PGPool) -> Self {
        Self { pool }
    }
}

pub async fn init_db_pool(config: &AppConfig) -> Result<PGPool, sqlx::Error> {
    let pool: PGPool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;
    info!("connected to postgresql");
    Ok(pool)
}

pub async fn run_migrations(pool: &PGPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("database migrations applied");
    Ok(())
}
