//! 환불 요청

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::CreateRefundRequest;
use crate::domain::entities::{NewRefund, Order, OrderStatus, Refund, REFUND_PENDING};
use crate::repositories::{OrderRepository, RefundRepository};
use crate::utils::money::format_minor_units;

/// 배송 완료된 주문에 대해 주문 총액 이하로만 환불을 요청할 수 있습니다.
pub fn check_refundable(order: &Order, amount: i64) -> Result<(), AppError> {
    if order.status != OrderStatus::Delivered {
        return Err(AppError::ValidationError(format!(
            "배송 완료된 주문만 환불을 요청할 수 있습니다 (현재 상태: {})",
            order.status
        )));
    }
    if amount <= 0 || amount > order.total {
        return Err(AppError::ValidationError(format!(
            "환불 금액은 주문 총액({}) 이하여야 합니다",
            format_minor_units(order.total)
        )));
    }
    Ok(())
}

#[service(name = "refund")]
pub struct RefundService {
    refund_repo: Arc<RefundRepository>,
    order_repo: Arc<OrderRepository>,
}

impl RefundService {
    pub async fn request_refund(&self, user_id: &str, request: CreateRefundRequest) -> Result<Refund, AppError> {
        let order = self.order_repo
            .find_by_id(&request.order_id)
            .await?
            .filter(|order| order.is_owned_by(user_id))
            .ok_or_else(|| AppError::NotFound(format!("주문을 찾을 수 없습니다: {}", request.order_id)))?;

        check_refundable(&order, request.amount)?;

        if self.refund_repo.find_open_for_order(&order.id).await?.is_some() {
            return Err(AppError::ConflictError("이미 처리 중인 환불 요청이 있습니다".to_string()));
        }

        let refund = NewRefund {
            order_id: order.id.clone(),
            user_id: user_id.to_string(),
            amount: request.amount,
            reason: request.reason.trim().to_string(),
            status: REFUND_PENDING,
        };

        let created = self.refund_repo.insert(&refund).await?;
        log::info!("환불 요청: {} (order {})", created.id, order.id);
        Ok(created)
    }

    pub async fn user_refunds(&self, user_id: &str) -> Result<Vec<Refund>, AppError> {
        self.refund_repo.list_by_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: &str, total: &str) -> Order {
        serde_json::from_value(serde_json::json!({
            "id": "o-1", "user_id": "u-1", "shop_id": "s-1",
            "status": status, "total": total, "service_fee": "0", "delivery_fee": "0",
            "discount": "0", "delivery_address_id": "a-1"
        }))
        .unwrap()
    }

    #[test]
    fn test_refund_requires_delivered_order() {
        assert!(check_refundable(&order("delivered", "100"), 5_000).is_ok());
        assert!(check_refundable(&order("on_the_way", "100"), 5_000).is_err());
    }

    #[test]
    fn test_refund_amount_bounded_by_total() {
        let o = order("delivered", "100");
        assert!(check_refundable(&o, 10_000).is_ok());
        assert!(check_refundable(&o, 10_001).is_err());
        assert!(check_refundable(&o, 0).is_err());
    }
}
