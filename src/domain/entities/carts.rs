//! Carts / Cart_Items

use serde::{Deserialize, Serialize};
use crate::utils::money::deserialize_minor_units;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    /// 장바구니에 담을 당시 단가 (최소 단위)
    #[serde(deserialize_with = "deserialize_minor_units")]
    pub price: i64,
}

impl CartItem {
    pub fn line_total(&self) -> i64 {
        self.price * self.quantity
    }
}

/// 사용자 한 명의 매장별 장바구니
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: String,
    pub user_id: String,
    pub shop_id: String,
    #[serde(rename = "Cart_Items", default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn subtotal(&self) -> i64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn total_units(&self) -> u32 {
        self.items
            .iter()
            .map(|item| item.quantity.max(0) as u32)
            .sum()
    }

    pub fn product_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.items.iter().map(|i| i.product_id.clone()).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}
