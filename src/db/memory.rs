//! In-process store used by the test suites.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{AppointmentStore, NotificationStore, StoreError, UserStore};
use crate::models::{
    Appointment, AppointmentWithProvider, File, NewAppointment, NewNotification, NewUser,
    Notification, User,
};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    notifications_fail: AtomicBool,
}

#[derive(Default)]
struct Inner {
    last_id: i32,
    users: Vec<User>,
    files: Vec<File>,
    appointments: Vec<Appointment>,
    notifications: Vec<Notification>,
}

impl Inner {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

impl MemoryStore {
    pub async fn add_avatar(&self, user_id: i32, path: &str) -> File {
        let mut inner = self.inner.lock().await;
        let file = File {
            id: inner.next_id(),
            name: format!("{path}.png"),
            path: path.to_string(),
        };
        inner.files.push(file.clone());
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == user_id) {
            user.avatar_id = Some(file.id);
        }
        file
    }

    /// Inserts a row as-is, bypassing the slot check.
    pub async fn insert_appointment(
        &self,
        user_id: i32,
        provider_id: i32,
        date: DateTime<Utc>,
        canceled_at: Option<DateTime<Utc>>,
    ) -> Appointment {
        let mut inner = self.inner.lock().await;
        let appointment = Appointment {
            id: inner.next_id(),
            user_id,
            provider_id,
            date,
            canceled_at,
        };
        inner.appointments.push(appointment.clone());
        appointment
    }

    /// Makes every later notification write fail like a lost connection.
    pub fn fail_notifications(&self) {
        self.notifications_fail.store(true, Ordering::SeqCst);
    }

    pub async fn push_notification(&self, recipient: i32, content: &str) -> Notification {
        let mut inner = self.inner.lock().await;
        let notification = new_notification(NewNotification {
            recipient,
            content: content.to_string(),
        });
        inner.notifications.push(notification.clone());
        notification
    }

    pub async fn appointments(&self) -> Vec<Appointment> {
        self.inner.lock().await.appointments.clone()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.inner.lock().await.notifications.clone()
    }
}

fn new_notification(new: NewNotification) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        recipient: new.recipient,
        content: new.content,
        read: false,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::EmailTaken);
        }
        let user = User {
            id: inner.next_id(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            provider: new_user.provider,
            avatar_id: None,
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_provider(&self, id: i32) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .users
            .iter()
            .find(|u| u.id == id && u.provider)
            .cloned())
    }
}

#[async_trait]
impl AppointmentStore for MemoryStore {
    async fn list_for_customer(
        &self,
        user_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AppointmentWithProvider>, StoreError> {
        let inner = self.inner.lock().await;
        let mut own: Vec<&Appointment> = inner
            .appointments
            .iter()
            .filter(|a| a.user_id == user_id && !a.is_canceled())
            .collect();
        own.sort_by_key(|a| (a.date, a.id));

        let rows = own
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .filter_map(|a| {
                let provider = inner.users.iter().find(|u| u.id == a.provider_id)?;
                let avatar = provider
                    .avatar_id
                    .and_then(|id| inner.files.iter().find(|f| f.id == id));
                Some(AppointmentWithProvider {
                    id: a.id,
                    date: a.date,
                    provider_id: provider.id,
                    provider_name: provider.name.clone(),
                    avatar_id: avatar.map(|f| f.id),
                    avatar_path: avatar.map(|f| f.path.clone()),
                })
            })
            .collect();
        Ok(rows)
    }

    async fn find_active_at(
        &self,
        provider_id: i32,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .appointments
            .iter()
            .find(|a| a.provider_id == provider_id && a.date == date && !a.is_canceled())
            .cloned())
    }

    async fn book_appointment(
        &self,
        new: NewAppointment,
        notification: NewNotification,
    ) -> Result<Appointment, StoreError> {
        let mut inner = self.inner.lock().await;
        let taken = inner
            .appointments
            .iter()
            .any(|a| a.provider_id == new.provider_id && a.date == new.date && !a.is_canceled());
        if taken {
            return Err(StoreError::SlotTaken);
        }
        if self.notifications_fail.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let appointment = Appointment {
            id: inner.next_id(),
            user_id: new.user_id,
            provider_id: new.provider_id,
            date: new.date,
            canceled_at: None,
        };
        inner.appointments.push(appointment.clone());
        inner.notifications.push(new_notification(notification));
        Ok(appointment)
    }

    async fn find_appointment(&self, id: i32) -> Result<Option<Appointment>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn cancel_appointment(
        &self,
        id: i32,
        canceled_at: DateTime<Utc>,
    ) -> Result<Appointment, StoreError> {
        let mut inner = self.inner.lock().await;
        let appointment = inner
            .appointments
            .iter_mut()
            .find(|a| a.id == id && !a.is_canceled())
            .ok_or(StoreError::NotFound)?;
        appointment.canceled_at = Some(canceled_at);
        Ok(appointment.clone())
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn list_notifications(
        &self,
        recipient: i32,
        limit: i64,
    ) -> Result<Vec<Notification>, StoreError> {
        let inner = self.inner.lock().await;
        // insertion order doubles as creation order
        Ok(inner
            .notifications
            .iter()
            .rev()
            .filter(|n| n.recipient == recipient)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, id: Uuid, recipient: i32) -> Result<Option<Notification>, StoreError> {
        let mut inner = self.inner.lock().await;
        let notification = inner
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.recipient == recipient);
        Ok(notification.map(|n| {
            n.read = true;
            n.clone()
        }))
    }
}
