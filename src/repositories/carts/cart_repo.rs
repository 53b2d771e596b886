//! `Carts` / `Cart_Items` 리포지토리

use std::sync::Arc;
use serde::Deserialize;
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::entities::Cart;
use crate::graphql::{HasuraClient, MutationResult};

pub struct CartRepository {
    client: Arc<HasuraClient>,
}

impl CartRepository {
    pub fn new(client: Arc<HasuraClient>) -> Self {
        Self { client }
    }

    /// 사용자의 매장별 장바구니 (항목 포함)
    pub async fn find_for_shop(&self, user_id: &str, shop_id: &str) -> Result<Option<Cart>, AppError> {
        #[derive(Deserialize)]
        struct CartsData {
            #[serde(rename = "Carts")]
            carts: Vec<Cart>,
        }

        let data: CartsData = self.client
            .request(
                "query CartForShop($user_id: uuid!, $shop_id: uuid!) { \
                 Carts(where: {user_id: {_eq: $user_id}, shop_id: {_eq: $shop_id}}, limit: 1) { \
                 id user_id shop_id Cart_Items { id product_id quantity price } } }",
                json!({ "user_id": user_id, "shop_id": shop_id }),
            )
            .await?;

        Ok(data.carts.into_iter().next())
    }

    /// 장바구니 항목과 장바구니를 삭제합니다.
    pub async fn delete_cart(&self, cart_id: &str) -> Result<(), AppError> {
        #[derive(Deserialize)]
        struct Deleted {
            #[serde(rename = "delete_Cart_Items")]
            _items: MutationResult,
            #[serde(rename = "delete_Carts_by_pk")]
            cart: Option<serde_json::Value>,
        }

        let data: Deleted = self.client
            .request(
                "mutation DeleteCart($cart_id: uuid!) { \
                 delete_Cart_Items(where: {cart_id: {_eq: $cart_id}}) { affected_rows } \
                 delete_Carts_by_pk(id: $cart_id) { id } }",
                json!({ "cart_id": cart_id }),
            )
            .await?;

        if data.cart.is_none() {
            log::warn!("장바구니가 이미 삭제되었습니다: {}", cart_id);
        }
        Ok(())
    }
}

crate::impl_repository!(CartRepository, "cart", "Carts");
