use actix_web::{post, web, HttpResponse};
use log::info;

use crate::{dto::NewUserDto, errors::ApiError, service, state::AppState};

#[post("")]
pub async fn register(
    dto: web::Json<NewUserDto>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = service::user::create(dto.into_inner(), state.get_ref()).await?;
    info!("RESPONSE /USERS: user #{}", user.id);
    Ok(HttpResponse::Ok().json(user))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register);
}
