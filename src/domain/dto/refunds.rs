use serde::Deserialize;
use validator::Validate;
use crate::utils::money::deserialize_minor_units;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRefundRequest {
    #[validate(length(min = 1, message = "order_id가 필요합니다"))]
    pub order_id: String,

    #[serde(deserialize_with = "deserialize_minor_units")]
    #[validate(range(min = 1, message = "환불 금액은 0보다 커야 합니다"))]
    pub amount: i64,

    #[validate(length(min = 3, max = 1000, message = "사유는 3-1000자 사이여야 합니다"))]
    pub reason: String,
}
