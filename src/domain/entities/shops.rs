//! 매장, 상품, 배송지

use serde::{Deserialize, Serialize};
use crate::domain::models::geo::{deserialize_coordinate, GeoPoint};
use crate::utils::money::deserialize_minor_units;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_coordinate")]
    pub latitude: f64,
    #[serde(deserialize_with = "deserialize_coordinate")]
    pub longitude: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Shop {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub shop_id: String,
    pub name: String,
    /// 최소 단위
    #[serde(deserialize_with = "deserialize_minor_units")]
    pub price: i64,
    /// 현재 재고
    pub quantity: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub user_id: String,
    #[serde(deserialize_with = "deserialize_coordinate")]
    pub latitude: f64,
    #[serde(deserialize_with = "deserialize_coordinate")]
    pub longitude: f64,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl Address {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_row_parsing() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "p-1",
            "shop_id": "s-1",
            "name": "Milk 1L",
            "price": "1200.00",
            "quantity": 7
        }))
        .unwrap();

        assert_eq!(product.price, 120_000);
        assert_eq!(product.quantity, 7);
        assert!(product.is_active);
    }

    #[test]
    fn test_shop_location() {
        let shop: Shop = serde_json::from_value(serde_json::json!({
            "id": "s-1", "name": "Simba", "latitude": "-1.95", "longitude": "30.06"
        }))
        .unwrap();

        assert_eq!(shop.location(), GeoPoint::new(-1.95, 30.06));
    }
}
