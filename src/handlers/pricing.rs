use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppResult;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::QuoteRequest;
use crate::services::pricing::FeeService;

/// `POST /api/pricing/quote` - 현재 장바구니의 요금 견적
pub async fn quote(user: AuthenticatedUser, payload: web::Json<QuoteRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let fees = FeeService::instance().quote_cart(&user.user_id, &payload).await?;
    Ok(HttpResponse::Ok().json(fees))
}
