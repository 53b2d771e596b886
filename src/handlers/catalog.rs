//! 매장/상품 목록 (인증 불필요)

use actix_web::{web, HttpResponse};
use serde_json::json;
use crate::core::errors::AppResult;
use crate::domain::dto::ShopIdQuery;
use crate::services::catalog::CatalogService;
use crate::utils::string_utils::require_param;

pub async fn shops() -> AppResult<HttpResponse> {
    let shops = CatalogService::instance().shops().await?;
    Ok(HttpResponse::Ok().json(json!({ "shops": shops })))
}

pub async fn shop_products(query: web::Query<ShopIdQuery>) -> AppResult<HttpResponse> {
    let shop_id = require_param(&query.shop_id, "shop_id")?;

    let products = CatalogService::instance().shop_products(shop_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "products": products })))
}
