//! 주문 조회/취소와 쇼퍼 주문 처리 핸들러

use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::core::errors::AppResult;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{OrderIdQuery, OrderIdRequest, UpdateOrderStatusRequest, UserOrdersQuery};
use crate::services::orders::OrderService;
use crate::utils::string_utils::require_param;

/// `GET /api/queries/user-orders?status=&limit=&offset=`
pub async fn user_orders(user: AuthenticatedUser, query: web::Query<UserOrdersQuery>) -> AppResult<HttpResponse> {
    let orders = OrderService::instance().user_orders(&user.user_id, &query).await?;
    Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

/// `GET /api/queries/order-details?id=`
pub async fn order_details(user: AuthenticatedUser, query: web::Query<OrderIdQuery>) -> AppResult<HttpResponse> {
    let order_id = require_param(&query.id, "id")?;

    let order = OrderService::instance().order_details(order_id, &user).await?;
    Ok(HttpResponse::Ok().json(json!({ "order": order })))
}

/// `POST /api/mutations/cancel-order`
pub async fn cancel_order(user: AuthenticatedUser, payload: web::Json<OrderIdRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let status = OrderService::instance().cancel(&user.user_id, &payload.order_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "order_id": payload.order_id, "status": status })))
}

/// `POST /api/shopper/accept-order`
pub async fn accept_order(user: AuthenticatedUser, payload: web::Json<OrderIdRequest>) -> AppResult<HttpResponse> {
    payload.validate()?;

    let status = OrderService::instance().accept(&user.user_id, &payload.order_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "order_id": payload.order_id, "status": status })))
}

/// `POST /api/shopper/update-order-status`
pub async fn update_order_status(
    user: AuthenticatedUser,
    payload: web::Json<UpdateOrderStatusRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;

    let status = OrderService::instance().update_status(&user.user_id, &payload).await?;
    Ok(HttpResponse::Ok().json(json!({ "order_id": payload.order_id, "status": status })))
}
