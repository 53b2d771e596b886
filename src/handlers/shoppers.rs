//! 쇼퍼 신청과 지갑 핸들러

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppResult;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{PayoutRequest, ShopperApplicationRequest};
use crate::services::shoppers::ShopperService;

/// `POST /api/shopper/apply` - 로그인한 모든 사용자
pub async fn apply(user: AuthenticatedUser, payload: web::Json<ShopperApplicationRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let application = ShopperService::instance().apply(&user.user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({ "application": application })))
}

/// `GET /api/shopper/application`
pub async fn application(user: AuthenticatedUser) -> AppResult<HttpResponse> {
    let application = ShopperService::instance().application(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "application": application })))
}

/// `GET /api/shopper/wallet` (shopper 역할)
pub async fn wallet(user: AuthenticatedUser) -> AppResult<HttpResponse> {
    let wallet = ShopperService::instance().wallet(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(wallet))
}

/// `POST /api/shopper/payout` (shopper 역할)
pub async fn payout(user: AuthenticatedUser, payload: web::Json<PayoutRequest>) -> AppResult<HttpResponse> {
    let transaction = ShopperService::instance().request_payout(&user.user_id, &payload).await?;
    Ok(HttpResponse::Created().json(json!({ "transaction": transaction })))
}
