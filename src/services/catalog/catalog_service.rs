//! 매장/상품 목록 조회 (캐시는 [`CatalogRepository`]가 처리)

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::entities::{Product, Shop};
use crate::repositories::CatalogRepository;

#[service(name = "catalog")]
pub struct CatalogService {
    catalog_repo: Arc<CatalogRepository>,
}

impl CatalogService {
    pub async fn shops(&self) -> Result<Vec<Shop>, AppError> {
        self.catalog_repo.list_active_shops().await
    }

    /// 없는 매장이면 404
    pub async fn shop_products(&self, shop_id: &str) -> Result<Vec<Product>, AppError> {
        self.catalog_repo
            .list_shop_products(shop_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("매장을 찾을 수 없습니다: {}", shop_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use serde_json::{json, Value};
    use crate::graphql::testing::{data, FakeHasura};

    fn service_on(hasura: &FakeHasura) -> CatalogService {
        CatalogService { catalog_repo: Arc::new(CatalogRepository::new(hasura.client(), None, 300)) }
    }

    fn catalog(shop_exists: bool) -> impl Fn(&str, &Value) -> (StatusCode, Value) + Send + Sync + 'static {
        move |op: &str, _: &Value| match op {
            "ShopById" if shop_exists => data(json!({ "Shops_by_pk": {
                "id": "s-1", "name": "Corner Market", "latitude": 37.5, "longitude": 127.0
            } })),
            "ShopById" => data(json!({ "Shops_by_pk": null })),
            "ShopProducts" => data(json!({ "Products": [
                { "id": "p-1", "shop_id": "s-1", "name": "Apples", "price": "3.50", "quantity": 12 }
            ] })),
            other => (StatusCode::OK, json!({ "errors": [{ "message": format!("unexpected {}", other) }] })),
        }
    }

    #[actix_web::test]
    async fn test_unknown_shop_is_not_found() {
        let hasura = FakeHasura::start(catalog(false));

        let err = service_on(&hasura).shop_products("s-404").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(hasura.operations(), vec!["ShopById"]);
    }

    #[actix_web::test]
    async fn test_cache_miss_checks_shop_then_loads_products() {
        let hasura = FakeHasura::start(catalog(true));

        let products = service_on(&hasura).shop_products("s-1").await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, 350);
        assert_eq!(hasura.operations(), vec!["ShopById", "ShopProducts"]);
    }
}
