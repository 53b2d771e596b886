//! B2B RFQ/견적 DTO

use serde::Deserialize;
use validator::Validate;
use crate::utils::money::{deserialize_minor_units, deserialize_optional_minor_units};
use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRfqRequest {
    #[validate(length(min = 3, max = 200, message = "제목은 3-200자 사이여야 합니다"))]
    pub title: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(min = 1, message = "수량은 1 이상이어야 합니다"))]
    pub quantity: i64,

    #[serde(default, deserialize_with = "deserialize_optional_minor_units")]
    pub budget: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub deadline: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuoteRequest {
    #[validate(length(min = 1, message = "rfq_id가 필요합니다"))]
    pub rfq_id: String,

    #[serde(deserialize_with = "deserialize_minor_units")]
    #[validate(range(min = 1, message = "금액은 0보다 커야 합니다"))]
    pub amount: i64,

    #[validate(range(min = 1, max = 365, message = "배송 기간은 1-365일 사이여야 합니다"))]
    pub delivery_days: i32,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AcceptQuoteRequest {
    #[validate(length(min = 1, message = "quote_id가 필요합니다"))]
    pub quote_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_request_bounds() {
        let req: SubmitQuoteRequest = serde_json::from_value(serde_json::json!({
            "rfq_id": "rfq-1", "amount": "0", "delivery_days": 400
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
        assert!(errors.field_errors().contains_key("delivery_days"));
    }

    #[test]
    fn test_rfq_budget_is_optional() {
        let req: CreateRfqRequest = serde_json::from_value(serde_json::json!({
            "title": "Rice 50kg bags", "quantity": 40
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        assert!(req.budget.is_none());
    }
}
