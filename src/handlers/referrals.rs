use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppResult;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::RegisterReferrerRequest;
use crate::services::referrals::ReferralService;

/// `POST /api/referrals/register` - 본문은 생략 가능
pub async fn register(
    user: AuthenticatedUser,
    payload: Option<web::Json<RegisterReferrerRequest>>,
) -> AppResult<HttpResponse> {
    let request = payload.map(web::Json::into_inner).unwrap_or_default();
    request.validate()?;

    let code = ReferralService::instance().register_referrer(&user.user_id, request).await?;
    Ok(HttpResponse::Ok().json(json!({ "code": code })))
}

/// `GET /api/referrals/stats`
pub async fn stats(user: AuthenticatedUser) -> AppResult<HttpResponse> {
    let stats = ReferralService::instance().stats(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(stats))
}
