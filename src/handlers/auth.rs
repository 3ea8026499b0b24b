use actix_web::{post, web, HttpResponse};
use log::info;

use crate::{dto::LoginUserRequest, errors::ApiError, service, state::AppState};

#[post("")]
pub async fn login(
    dto: web::Json<LoginUserRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let session = service::auth::login(dto.into_inner(), state.get_ref()).await?;
    info!("RESPONSE /SESSIONS: user #{}", session.user.id);
    Ok(HttpResponse::Ok().json(session))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login);
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::{handlers, testing};

    #[actix_rt::test]
    async fn issued_token_opens_protected_routes() {
        let (state, _) = testing::state();
        testing::seed_user(&state, "Ana", "ana@example.com", false).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(|cfg| handlers::config(cfg, &state.config.jwt_secret)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/sessions")
            .set_json(json!({ "email": "ana@example.com", "password": testing::PASSWORD }))
            .to_request();
        let session: Value = test::call_and_read_body_json(&app, req).await;
        let token = session["token"].as_str().unwrap().to_string();
        assert_eq!(session["user"]["email"], "ana@example.com");

        let req = test::TestRequest::get()
            .uri("/appointments")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn wrong_password_is_unauthorized() {
        let (state, _) = testing::state();
        testing::seed_user(&state, "Ana", "ana@example.com", false).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state.clone()))
                .configure(|cfg| handlers::config(cfg, &state.config.jwt_secret)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/sessions")
            .set_json(json!({ "email": "ana@example.com", "password": "nope-nope" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let json: Value = test::read_body_json(res).await;
        assert_eq!(json["error"], "Password does not match");
    }
}
