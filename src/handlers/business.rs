//! B2B RFQ/견적 핸들러

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppResult;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{AcceptQuoteRequest, CreateRfqRequest, SubmitQuoteRequest};
use crate::services::business::RfqService;

pub async fn create_rfq(user: AuthenticatedUser, payload: web::Json<CreateRfqRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let rfq = RfqService::instance().create_rfq(&user.user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({ "rfq": rfq })))
}

pub async fn list_rfqs(_user: AuthenticatedUser) -> AppResult<HttpResponse> {
    let rfqs = RfqService::instance().open_rfqs().await?;
    Ok(HttpResponse::Ok().json(json!({ "rfqs": rfqs })))
}

pub async fn submit_quote(user: AuthenticatedUser, payload: web::Json<SubmitQuoteRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let quote = RfqService::instance().submit_quote(&user.user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({ "quote": quote })))
}

pub async fn accept_quote(user: AuthenticatedUser, payload: web::Json<AcceptQuoteRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let contract = RfqService::instance().accept_quote(&user.user_id, &payload.quote_id).await?;
    Ok(HttpResponse::Created().json(json!({ "contract": contract })))
}
