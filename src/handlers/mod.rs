pub mod appointment;
pub mod auth;
pub mod notification;
pub mod user;

use actix_web::{web, HttpMessage, HttpRequest};
use log::warn;

use crate::{errors::ApiError, service::auth::{AuthMiddleware, UserAuthData}};

/// Registers every route; `secret` signs and verifies bearer tokens.
pub fn config(cfg: &mut web::ServiceConfig, secret: &str) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(web::scope("/users").configure(user::init_routes))
        .service(web::scope("/sessions").configure(auth::init_routes))
        .service(
            web::scope("/appointments")
                .wrap(AuthMiddleware::new(secret))
                .configure(appointment::init_routes),
        )
        .service(
            web::scope("/notifications")
                .wrap(AuthMiddleware::new(secret))
                .configure(notification::init_routes),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        warn!("rejected body for {}: {}", req.path(), err);
        ApiError::ValidationFailed.into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        warn!("rejected query for {}: {}", req.path(), err);
        ApiError::ValidationFailed.into()
    })
}

pub(crate) fn auth_data(req: &HttpRequest) -> Result<UserAuthData, ApiError> {
    req.extensions()
        .get::<UserAuthData>()
        .cloned()
        .ok_or(ApiError::TokenMissing)
}
