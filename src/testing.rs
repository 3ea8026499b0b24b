//! Fixtures shared by the unit and HTTP tests.

use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::memory::MemoryStore,
    models::{NewUser, User},
    service::{auth::jwt, crypto},
    state::AppState,
};

pub const PASSWORD: &str = "123456";

pub fn config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_expires_in_secs: 3600,
        app_url: "http://localhost:3333".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        db_max_connections: 1,
    }
}

pub fn state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState {
        users: store.clone(),
        appointments: store.clone(),
        notifications: store.clone(),
        config: Arc::new(config()),
    };
    (state, store)
}

pub async fn seed_user(state: &AppState, name: &str, email: &str, provider: bool) -> User {
    state
        .users
        .create_user(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: crypto::hash_password(PASSWORD),
            provider,
        })
        .await
        .unwrap()
}

pub fn bearer(state: &AppState, user: &User) -> (&'static str, String) {
    let token = jwt::create(user.id, &user.name, &state.config.jwt_secret, 3600).unwrap();
    ("Authorization", format!("Bearer {token}"))
}
