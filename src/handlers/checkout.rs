//! 체크아웃 핸들러

use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppResult;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{CheckoutRequest, CombinedCheckoutRequest};
use crate::services::checkout::{CheckoutService, CombinedOrderService};

/// `POST /api/checkout`
pub async fn checkout(user: AuthenticatedUser, payload: web::Json<CheckoutRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let response = CheckoutService::instance()
        .checkout(&user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(response))
}

/// `POST /api/mutations/create-combined-orders`
pub async fn create_combined_orders(
    user: AuthenticatedUser,
    payload: web::Json<CombinedCheckoutRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;

    let response = CombinedOrderService::instance()
        .create(&user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(response))
}
