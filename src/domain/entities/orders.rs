//! Orders / Order_Items 와 주문 상태 전이
//!
//! 상태는 `PENDING`에서 시작해 한 방향으로만 진행합니다.
//!
//! ```text
//! PENDING ─► accepted ─► shopping ─► on_the_way ─► delivered
//!    └─────► cancelled
//! ```

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;
use crate::utils::money::{deserialize_minor_units, serialize_minor_units};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "accepted")]
    Accepted,
    #[serde(rename = "shopping")]
    Shopping,
    #[serde(rename = "on_the_way")]
    OnTheWay,
    #[serde(rename = "delivered")]
    Delivered,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "accepted",
            Self::Shopping => "shopping",
            Self::OnTheWay => "on_the_way",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// 허용되는 다음 상태인지 확인
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted)
                | (Self::Pending, Self::Cancelled)
                | (Self::Accepted, Self::Shopping)
                | (Self::Shopping, Self::OnTheWay)
                | (Self::OnTheWay, Self::Delivered)
        )
    }

    /// 전이가 불가능하면 409
    pub fn ensure_transition(&self, next: OrderStatus) -> Result<(), AppError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(AppError::ConflictError(format!(
                "주문 상태를 {}에서 {}(으)로 변경할 수 없습니다",
                self, next
            )))
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PENDING" | "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "shopping" => Ok(Self::Shopping),
            "on_the_way" => Ok(Self::OnTheWay),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::ValidationError(format!("알 수 없는 주문 상태: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub shop_id: String,
    #[serde(default)]
    pub combined_order_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub pin: Option<String>,
    pub status: OrderStatus,
    #[serde(deserialize_with = "deserialize_minor_units", serialize_with = "serialize_minor_units")]
    pub total: i64,
    #[serde(deserialize_with = "deserialize_minor_units", serialize_with = "serialize_minor_units")]
    pub service_fee: i64,
    #[serde(deserialize_with = "deserialize_minor_units", serialize_with = "serialize_minor_units")]
    pub delivery_fee: i64,
    #[serde(deserialize_with = "deserialize_minor_units", serialize_with = "serialize_minor_units")]
    pub discount: i64,
    #[serde(default)]
    pub voucher_code: Option<String>,
    pub delivery_address_id: String,
    #[serde(default)]
    pub delivery_time: Option<String>,
    #[serde(default)]
    pub delivery_notes: Option<String>,
    #[serde(default)]
    pub shopper_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "Order_Items", default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    pub fn is_assigned_to(&self, shopper_id: &str) -> bool {
        self.shopper_id.as_deref() == Some(shopper_id)
    }

    pub fn pin_matches(&self, candidate: &str) -> bool {
        self.pin.as_deref().is_some_and(|pin| pin == candidate.trim())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub order_id: Option<String>,
    pub product_id: String,
    pub quantity: i64,
    #[serde(deserialize_with = "deserialize_minor_units", serialize_with = "serialize_minor_units")]
    pub price: i64,
}

/// Orders insert 입력
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub user_id: String,
    pub shop_id: String,
    pub combined_order_id: Option<String>,
    pub pin: String,
    pub status: OrderStatus,
    #[serde(serialize_with = "serialize_minor_units")]
    pub total: i64,
    #[serde(serialize_with = "serialize_minor_units")]
    pub service_fee: i64,
    #[serde(serialize_with = "serialize_minor_units")]
    pub delivery_fee: i64,
    #[serde(serialize_with = "serialize_minor_units")]
    pub discount: i64,
    pub voucher_code: Option<String>,
    pub delivery_address_id: String,
    pub delivery_time: Option<String>,
    pub delivery_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewOrderItem {
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
    #[serde(serialize_with = "serialize_minor_units")]
    pub price: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_lifecycle_is_allowed() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Accepted));
        assert!(Accepted.can_transition_to(Shopping));
        assert!(Shopping.can_transition_to(OnTheWay));
        assert!(OnTheWay.can_transition_to(Delivered));
        assert!(Pending.can_transition_to(Cancelled));
    }

    #[test]
    fn test_other_transitions_conflict() {
        use OrderStatus::*;
        assert!(!Pending.can_transition_to(Delivered));
        assert!(!Accepted.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Accepted));
        assert!(!Shopping.can_transition_to(Shopping));

        let err = Delivered.ensure_transition(Shopping).unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_string(&OrderStatus::Pending).unwrap(), "\"PENDING\"");
        assert_eq!(serde_json::to_string(&OrderStatus::OnTheWay).unwrap(), "\"on_the_way\"");
        assert_eq!("on_the_way".parse::<OrderStatus>().unwrap(), OrderStatus::OnTheWay);
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_pin_is_hidden_but_checkable() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "o-1",
            "user_id": "u-1",
            "shop_id": "s-1",
            "pin": "07",
            "status": "on_the_way",
            "total": "2500.50",
            "service_fee": "100",
            "delivery_fee": 1000,
            "discount": "0",
            "delivery_address_id": "a-1",
            "shopper_id": "sh-1"
        }))
        .unwrap();

        assert_eq!(order.total, 250_050);
        assert!(order.pin_matches("07"));
        assert!(!order.pin_matches("7"));
        assert!(order.is_assigned_to("sh-1"));
        assert!(serde_json::to_value(&order).unwrap().get("pin").is_none());
    }
}
