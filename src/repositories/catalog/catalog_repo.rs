//! # 카탈로그 리포지토리
//!
//! `Shops`, `Products`, `Addresses` 조회를 담당합니다.
//! 활성 매장 목록과 매장별 상품 목록은 Redis에 TTL 캐시합니다.
//!
//! ## 캐싱 정책
//!
//! - **키**: `catalog:shops:active`, `catalog:shop:{shop_id}:products`
//! - **TTL**: `CACHE_TTL_SECONDS` (기본 300초)
//! - 캐시 읽기/쓰기 실패는 `warn` 로그만 남기고 Hasura 조회로 진행합니다.
//! - 체크아웃 재고 확인(`find_products`)은 항상 Hasura에서 직접 읽습니다.

use std::sync::Arc;
use serde::Deserialize;
use serde_json::json;
use crate::caching::keys::{shop_products_key, shops_key};
use crate::caching::redis::RedisClient;
use crate::core::errors::AppError;
use crate::domain::entities::{Address, Product, Shop};
use crate::graphql::HasuraClient;

const SHOP_FIELDS: &str = "id name latitude longitude is_active address image";
const PRODUCT_FIELDS: &str = "id shop_id name price quantity is_active image";
const ADDRESS_FIELDS: &str = "id user_id latitude longitude street city";

pub struct CatalogRepository {
    client: Arc<HasuraClient>,
    cache: Option<Arc<RedisClient>>,
    ttl_seconds: u64,
}

#[derive(Deserialize)]
struct ShopsData {
    #[serde(rename = "Shops")]
    shops: Vec<Shop>,
}

#[derive(Deserialize)]
struct ProductsData {
    #[serde(rename = "Products")]
    products: Vec<Product>,
}

impl CatalogRepository {
    /// `cache`가 `None`이면 캐시 없이 동작합니다 (Redis 미연결 환경).
    pub fn new(client: Arc<HasuraClient>, cache: Option<Arc<RedisClient>>, ttl_seconds: u64) -> Self {
        Self { client, cache, ttl_seconds }
    }

    pub async fn find_shop(&self, shop_id: &str) -> Result<Option<Shop>, AppError> {
        #[derive(Deserialize)]
        struct ShopByPk {
            #[serde(rename = "Shops_by_pk")]
            shop: Option<Shop>,
        }

        let query = format!("query ShopById($id: uuid!) {{ Shops_by_pk(id: $id) {{ {} }} }}", SHOP_FIELDS);
        let data: ShopByPk = self.client.request(&query, json!({ "id": shop_id })).await?;
        Ok(data.shop)
    }

    /// 사용자 소유 배송지만 반환합니다.
    pub async fn find_address(&self, address_id: &str, user_id: &str) -> Result<Option<Address>, AppError> {
        #[derive(Deserialize)]
        struct AddressesData {
            #[serde(rename = "Addresses")]
            addresses: Vec<Address>,
        }

        let query = format!(
            "query AddressById($id: uuid!, $user_id: uuid!) {{ \
             Addresses(where: {{id: {{_eq: $id}}, user_id: {{_eq: $user_id}}}}, limit: 1) {{ {} }} }}",
            ADDRESS_FIELDS
        );

        let data: AddressesData = self.client
            .request(&query, json!({ "id": address_id, "user_id": user_id }))
            .await?;
        Ok(data.addresses.into_iter().next())
    }

    /// 재고 확인용 상품 조회 (캐시 사용 안 함)
    pub async fn find_products(&self, product_ids: &[String]) -> Result<Vec<Product>, AppError> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "query ProductsByIds($ids: [uuid!]!) {{ Products(where: {{id: {{_in: $ids}}}}) {{ {} }} }}",
            PRODUCT_FIELDS
        );

        let data: ProductsData = self.client.request(&query, json!({ "ids": product_ids })).await?;
        Ok(data.products)
    }

    pub async fn list_active_shops(&self) -> Result<Vec<Shop>, AppError> {
        let key = shops_key();
        if let Some(cached) = self.cache_get::<Vec<Shop>>(&key).await {
            return Ok(cached);
        }

        let query = format!(
            "query ActiveShops {{ Shops(where: {{is_active: {{_eq: true}}}}, order_by: {{name: asc}}) {{ {} }} }}",
            SHOP_FIELDS
        );
        let data: ShopsData = self.client.request(&query, json!({})).await?;

        self.cache_put(&key, &data.shops).await;
        Ok(data.shops)
    }

    /// 매장의 판매 중 상품. 매장이 없으면 `None`.
    ///
    /// 캐시에 있으면 Hasura를 호출하지 않고, 캐시 미스일 때만 매장 존재를 확인합니다.
    pub async fn list_shop_products(&self, shop_id: &str) -> Result<Option<Vec<Product>>, AppError> {
        let key = shop_products_key(shop_id);
        if let Some(cached) = self.cache_get::<Vec<Product>>(&key).await {
            return Ok(Some(cached));
        }

        if self.find_shop(shop_id).await?.is_none() {
            return Ok(None);
        }

        let query = format!(
            "query ShopProducts($shop_id: uuid!) {{ \
             Products(where: {{shop_id: {{_eq: $shop_id}}, is_active: {{_eq: true}}}}, order_by: {{name: asc}}) {{ {} }} }}",
            PRODUCT_FIELDS
        );
        let data: ProductsData = self.client.request(&query, json!({ "shop_id": shop_id })).await?;

        self.cache_put(&key, &data.products).await;
        Ok(Some(data.products))
    }

    /// 주문 생성 후 재고가 바뀐 매장의 상품 캐시를 비웁니다.
    pub async fn invalidate_shop_products(&self, shop_id: &str) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.del(&shop_products_key(shop_id)).await {
                log::warn!("캐시 무효화 실패 ({}): {}", shop_id, e);
            }
        }
    }

    async fn cache_get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        match cache.get::<T>(key).await {
            Ok(hit) => {
                if hit.is_some() {
                    log::debug!("캐시 적중: {}", key);
                }
                hit
            }
            Err(e) => {
                log::warn!("캐시 조회 실패 ({}): {}", key, e);
                None
            }
        }
    }

    async fn cache_put<T: serde::Serialize>(&self, key: &str, value: &T) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set_with_expiry(key, value, self.ttl_seconds).await {
                log::warn!("캐시 저장 실패 ({}): {}", key, e);
            }
        }
    }
}

crate::impl_repository!(CatalogRepository, "catalog", "Shops");
