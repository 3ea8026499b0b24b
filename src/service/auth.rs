use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use log::{info, warn};

use crate::{
    dto::{LoginUserRequest, SessionResponse, UserDto},
    errors::ApiError,
    state::AppState,
};

use super::{crypto, user::normalize_email};

/// Identity of the caller, placed in the request extensions by [`AuthMiddleware`].
#[derive(Debug, Clone)]
pub struct UserAuthData {
    pub user_id: i32,
    pub name: String,
}

pub struct AuthMiddleware {
    secret: Rc<str>,
}

impl AuthMiddleware {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Rc::from(secret),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            secret: self.secret.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    secret: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claims = jwt::parse_request(&req, "Bearer ").and_then(|token| {
            jwt::decode_claims(&token, &self.secret).map_err(|err| {
                warn!("rejected bearer token: {}", err);
                ApiError::TokenInvalid
            })
        });
        match claims {
            Ok(claims) => {
                req.extensions_mut().insert(UserAuthData {
                    user_id: claims.user_id,
                    name: claims.name,
                });
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(err) => {
                let res = req.into_response(HttpResponse::from_error(err));
                Box::pin(async move { Ok(res.map_into_right_body()) })
            }
        }
    }
}

/// Exchanges an email/password pair for a signed access token.
pub async fn login(dto: LoginUserRequest, state: &AppState) -> Result<SessionResponse, ApiError> {
    let user = state
        .users
        .find_user_by_email(&normalize_email(&dto.email))
        .await?
        .ok_or(ApiError::UserNotFound)?;

    if !crypto::verify_password(&dto.password, &user.password_hash) {
        warn!("password mismatch for user #{}", user.id);
        return Err(ApiError::PasswordMismatch);
    }

    let token = jwt::create(
        user.id,
        &user.name,
        &state.config.jwt_secret,
        state.config.jwt_expires_in_secs,
    )
    .map_err(|err| {
        log::error!("failed to sign token for user #{}: {}", user.id, err);
        ApiError::Internal
    })?;
    info!("session opened for user #{}", user.id);

    Ok(SessionResponse {
        user: UserDto::from(&user),
        token,
    })
}

pub mod jwt {
    use actix_web::dev::ServiceRequest;
    use chrono::Utc;
    use jsonwebtoken::{
        decode, encode, errors::Error, Algorithm, DecodingKey, EncodingKey, Header, Validation,
    };

    use crate::{dto::Claims, errors::ApiError};

    pub fn create(user_id: i32, name: &str, secret: &str, expires_in_secs: i64) -> Result<String, Error> {
        let exp = (Utc::now().timestamp() + expires_in_secs).max(0) as usize;
        let claims = Claims::new(user_id, name, exp);
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Verifies signature and expiry.
    pub fn decode_claims(token: &str, secret: &str) -> Result<Claims, Error> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)?;
        Ok(data.claims)
    }

    pub fn parse_request(req: &ServiceRequest, prefix: &str) -> Result<String, ApiError> {
        let auth_value = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::TokenMissing)?;
        match auth_value.strip_prefix(prefix) {
            Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(ApiError::TokenInvalid),
        }
    }
}
