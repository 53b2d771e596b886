//! promotions 테이블 (바우처)

use serde::{Deserialize, Serialize};
use crate::utils::money::{deserialize_minor_units, deserialize_optional_minor_units};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percent,
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub code: String,
    pub discount_type: DiscountType,
    /// percent면 백분율 * 100 (예: 10% → 1000), fixed면 최소 단위 금액
    #[serde(deserialize_with = "deserialize_minor_units")]
    pub value: i64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_optional_minor_units")]
    pub min_order: Option<i64>,
}

impl Promotion {
    pub fn meets_minimum(&self, subtotal: i64) -> bool {
        self.min_order.is_none_or(|min| subtotal >= min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion_parsing() {
        let promo: Promotion = serde_json::from_value(serde_json::json!({
            "code": "WELCOME10",
            "discount_type": "percent",
            "value": "10",
            "is_active": true,
            "min_order": "5000"
        }))
        .unwrap();

        assert_eq!(promo.discount_type, DiscountType::Percent);
        assert_eq!(promo.value, 1_000);
        assert!(promo.meets_minimum(500_000));
        assert!(!promo.meets_minimum(499_999));
    }

    #[test]
    fn test_missing_min_order_means_no_minimum() {
        let promo: Promotion = serde_json::from_value(serde_json::json!({
            "code": "FLAT", "discount_type": "fixed", "value": 200, "is_active": true
        }))
        .unwrap();

        assert!(promo.meets_minimum(0));
    }
}
