use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{AppointmentStore, NotificationStore, PgStore, UserStore},
    PGPool,
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub appointments: Arc<dyn AppointmentStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn postgres(pool: PGPool, config: AppConfig) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self {
            users: store.clone(),
            appointments: store.clone(),
            notifications: store,
            config: Arc::new(config),
        }
    }
}
