//! 요금 견적과 체크아웃 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::models::pricing::FeeBreakdown;
use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequest {
    #[validate(length(min = 1, message = "shop_id가 필요합니다"))]
    pub shop_id: String,

    #[validate(length(min = 1, message = "address_id가 필요합니다"))]
    pub address_id: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub voucher_code: Option<String>,
}

/// 단일 매장 체크아웃
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "shop_id가 필요합니다"))]
    pub shop_id: String,

    #[validate(length(min = 1, message = "delivery_address_id가 필요합니다"))]
    pub delivery_address_id: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub delivery_time: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 500, message = "배송 메모는 500자 이하여야 합니다"))]
    pub delivery_notes: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub voucher_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreSelection {
    #[validate(length(min = 1, message = "shop_id가 필요합니다"))]
    pub shop_id: String,
}

/// 여러 매장 묶음 주문
#[derive(Debug, Deserialize, Validate)]
pub struct CombinedCheckoutRequest {
    #[validate(length(min = 1, message = "매장을 하나 이상 선택해주세요"), nested)]
    pub stores: Vec<StoreSelection>,

    #[validate(length(min = 1, message = "delivery_address_id가 필요합니다"))]
    pub delivery_address_id: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub delivery_time: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 500, message = "배송 메모는 500자 이하여야 합니다"))]
    pub delivery_notes: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub voucher_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub shop_id: String,
    pub pin: String,
    pub fees: FeeBreakdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct CombinedCheckoutResponse {
    pub combined_order_id: String,
    pub orders: Vec<CheckoutResponse>,
}
