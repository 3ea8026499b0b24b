use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use log::info;

use super::auth_data;
use crate::{
    dto::{NewAppointmentDto, PageQuery},
    errors::ApiError,
    service,
    state::AppState,
};

#[get("")]
pub async fn index(
    req: HttpRequest,
    query: web::Query<PageQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user_auth_data = auth_data(&req)?;
    let appointments = service::appointment::list(&user_auth_data, query.page, state.get_ref()).await?;
    Ok(HttpResponse::Ok().json(appointments))
}

#[post("")]
pub async fn store(
    req: HttpRequest,
    dto: web::Json<NewAppointmentDto>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user_auth_data = auth_data(&req)?;
    let appointment =
        service::appointment::create(&user_auth_data, dto.into_inner(), Utc::now(), state.get_ref())
            .await
            .map_err(|err| {
                info!("booking refused for user #{}: {}", user_auth_data.user_id, err);
                err
            })?;
    Ok(HttpResponse::Ok().json(appointment))
}

#[delete("/{id}")]
pub async fn cancel(
    req: HttpRequest,
    id: web::Path<i32>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user_auth_data = auth_data(&req)?;
    let appointment =
        service::appointment::cancel(&user_auth_data, id.into_inner(), Utc::now(), state.get_ref()).await?;
    Ok(HttpResponse::Ok().json(appointment))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(store).service(cancel);
}
