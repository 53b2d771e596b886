//! B2B 견적 요청(RFQ), 견적, 계약

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::money::{
    deserialize_minor_units, deserialize_optional_minor_units, serialize_minor_units,
};

pub const RFQ_OPEN: &str = "open";
pub const RFQ_CLOSED: &str = "closed";
pub const QUOTE_PENDING: &str = "pending";
pub const QUOTE_ACCEPTED: &str = "accepted";
pub const QUOTE_REJECTED: &str = "rejected";
pub const CONTRACT_ACTIVE: &str = "active";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRfq {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: i64,
    #[serde(default, deserialize_with = "deserialize_optional_minor_units")]
    pub budget: Option<i64>,
    #[serde(default)]
    pub deadline: Option<String>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl BusinessRfq {
    pub fn is_open(&self) -> bool {
        self.status == RFQ_OPEN
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewRfq {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub quantity: i64,
    pub budget: Option<String>,
    pub deadline: Option<String>,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessQuote {
    pub id: String,
    pub rfq_id: String,
    pub supplier_id: String,
    #[serde(deserialize_with = "deserialize_minor_units", serialize_with = "serialize_minor_units")]
    pub amount: i64,
    pub delivery_days: i32,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewQuote {
    pub rfq_id: String,
    pub supplier_id: String,
    #[serde(serialize_with = "serialize_minor_units")]
    pub amount: i64,
    pub delivery_days: i32,
    pub notes: Option<String>,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessContract {
    pub id: String,
    pub rfq_id: String,
    pub quote_id: String,
    pub buyer_id: String,
    pub supplier_id: String,
    #[serde(deserialize_with = "deserialize_minor_units", serialize_with = "serialize_minor_units")]
    pub amount: i64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewContract {
    pub rfq_id: String,
    pub quote_id: String,
    pub buyer_id: String,
    pub supplier_id: String,
    #[serde(serialize_with = "serialize_minor_units")]
    pub amount: i64,
    pub status: &'static str,
}
