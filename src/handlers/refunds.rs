use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppResult;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::CreateRefundRequest;
use crate::services::refunds::RefundService;

/// `POST /api/refunds`
pub async fn create_refund(user: AuthenticatedUser, payload: web::Json<CreateRefundRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let refund = RefundService::instance().request_refund(&user.user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({ "refund": refund })))
}

/// `GET /api/refunds`
pub async fn list_refunds(user: AuthenticatedUser) -> AppResult<HttpResponse> {
    let refunds = RefundService::instance().user_refunds(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "refunds": refunds })))
}
