//! 주문 조회와 상태 변경 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::Order;
use crate::utils::string_utils::deserialize_optional_string;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct UserOrdersQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl UserOrdersQuery {
    /// (limit, offset) 정규화: limit 1..=100, 기본 20; offset ≥ 0
    pub fn page(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderIdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OrderIdRequest {
    #[validate(length(min = 1, message = "order_id가 필요합니다"))]
    pub order_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOrderStatusRequest {
    #[validate(length(min = 1, message = "order_id가 필요합니다"))]
    pub order_id: String,

    #[validate(length(min = 1, message = "status가 필요합니다"))]
    pub status: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub pin: Option<String>,
}

/// 주문 상세 응답. 배송 PIN은 주문자에게만 보여줍니다.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetailsResponse {
    #[serde(flatten)]
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_and_bounds() {
        let q = UserOrdersQuery { status: None, limit: None, offset: None };
        assert_eq!(q.page(), (20, 0));

        let q = UserOrdersQuery { status: None, limit: Some(500), offset: Some(-3) };
        assert_eq!(q.page(), (100, 0));

        let q = UserOrdersQuery { status: None, limit: Some(0), offset: Some(40) };
        assert_eq!(q.page(), (1, 40));
    }
}
