use actix_web::{get, put, web, HttpRequest, HttpResponse};
use uuid::Uuid;

use super::auth_data;
use crate::{errors::ApiError, service, state::AppState};

#[get("")]
pub async fn index(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let user_auth_data = auth_data(&req)?;
    let notifications = service::notification::list(&user_auth_data, state.get_ref()).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

#[put("/{id}")]
pub async fn update(
    req: HttpRequest,
    id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user_auth_data = auth_data(&req)?;
    let notification =
        service::notification::mark_read(&user_auth_data, id.into_inner(), state.get_ref()).await?;
    Ok(HttpResponse::Ok().json(notification))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(update);
}
