//! Refunds 테이블

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::money::{deserialize_minor_units, serialize_minor_units};

pub const REFUND_PENDING: &str = "pending";
pub const REFUND_APPROVED: &str = "approved";
pub const REFUND_REJECTED: &str = "rejected";

/// 종결되지 않은 환불 상태
pub const OPEN_REFUND_STATUSES: [&str; 1] = [REFUND_PENDING];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Refund {
    pub id: String,
    pub order_id: String,
    pub user_id: String,
    #[serde(deserialize_with = "deserialize_minor_units", serialize_with = "serialize_minor_units")]
    pub amount: i64,
    pub reason: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Refund {
    pub fn is_open(&self) -> bool {
        OPEN_REFUND_STATUSES.contains(&self.status.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewRefund {
    pub order_id: String,
    pub user_id: String,
    #[serde(serialize_with = "serialize_minor_units")]
    pub amount: i64,
    pub reason: String,
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_refunds_are_open() {
        let mut refund: Refund = serde_json::from_value(serde_json::json!({
            "id": "rf-1", "order_id": "o-1", "user_id": "u-1",
            "amount": "10.00", "reason": "missing item", "status": "pending"
        }))
        .unwrap();
        assert!(refund.is_open());
        assert_eq!(refund.amount, 1_000);

        refund.status = REFUND_REJECTED.to_string();
        assert!(!refund.is_open());
        refund.status = REFUND_APPROVED.to_string();
        assert!(!refund.is_open());
    }
}
