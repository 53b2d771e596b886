//! 인증 핸들러
//!
//! 로그인/회원가입 성공 시 응답 본문의 `access_token`과 함께 같은 토큰을
//! HttpOnly 세션 쿠키로도 내려줍니다.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::config::{Environment, SessionConfig};
use crate::core::errors::AppResult;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{LoginRequest, RegisterRequest, SessionResponse};
use crate::services::users::UserService;

/// `POST /api/auth/login`
pub async fn login(payload: web::Json<LoginRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let session = UserService::instance().login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().cookie(session_cookie(&session)).json(session))
}

/// `POST /api/auth/register`
pub async fn register(payload: web::Json<RegisterRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let session = UserService::instance().register(payload.into_inner()).await?;
    Ok(HttpResponse::Created().cookie(session_cookie(&session)).json(session))
}

/// `GET /api/auth/session`
pub async fn session(user: AuthenticatedUser) -> AppResult<HttpResponse> {
    let current = UserService::instance().current_user(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(current))
}

fn session_cookie(session: &SessionResponse) -> Cookie<'static> {
    Cookie::build(SessionConfig::cookie_name(), session.access_token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(Environment::current() == Environment::Production)
        .max_age(actix_web::cookie::time::Duration::seconds(session.expires_in))
        .finish()
}
