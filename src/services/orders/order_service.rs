//! # 주문 조회와 상태 변경
//!
//! 주문자 조회/취소와 쇼퍼의 수락/진행 처리를 담당합니다.
//! 실제 상태 변경은 [`OrderRepository::transition`]의 조건부 업데이트로 실행되어
//! 동시에 들어온 요청 중 하나만 성공합니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::auth::AuthenticatedUser;
use crate::domain::dto::{OrderDetailsResponse, UpdateOrderStatusRequest, UserOrdersQuery};
use crate::domain::entities::{Order, OrderStatus};
use crate::repositories::OrderRepository;

/// 주문자, 배정된 쇼퍼, 관리자만 주문을 볼 수 있습니다.
pub fn can_view(order: &Order, user: &AuthenticatedUser) -> bool {
    order.is_owned_by(&user.user_id) || order.is_assigned_to(&user.user_id) || user.is_admin()
}

/// 쇼퍼의 상태 변경 요청을 검증합니다.
pub fn check_shopper_update(
    order: &Order,
    shopper_id: &str,
    next: OrderStatus,
    pin: Option<&str>,
) -> Result<(), AppError> {
    if !order.is_assigned_to(shopper_id) {
        return Err(AppError::AuthorizationError("배정된 쇼퍼만 주문 상태를 변경할 수 있습니다".to_string()));
    }

    // 취소는 주문자만
    if next == OrderStatus::Cancelled {
        return Err(AppError::AuthorizationError("쇼퍼는 주문을 취소할 수 없습니다".to_string()));
    }

    order.status.ensure_transition(next)?;

    if next == OrderStatus::Delivered {
        match pin {
            Some(candidate) if order.pin_matches(candidate) => {}
            Some(_) => return Err(AppError::ValidationError("배송 PIN이 일치하지 않습니다".to_string())),
            None => return Err(AppError::ValidationError("배송 완료에는 PIN이 필요합니다".to_string())),
        }
    }
    Ok(())
}

#[service(name = "order")]
pub struct OrderService {
    order_repo: Arc<OrderRepository>,
}

impl OrderService {
    /// `GET /api/queries/user-orders`
    pub async fn user_orders(&self, user_id: &str, query: &UserOrdersQuery) -> Result<Vec<Order>, AppError> {
        let status = query.status.as_deref().map(str::parse::<OrderStatus>).transpose()?;
        let (limit, offset) = query.page();

        self.order_repo.list_by_user(user_id, status, limit, offset).await
    }

    /// `GET /api/queries/order-details`
    ///
    /// 볼 권한이 없으면 존재 여부를 숨기기 위해 404를 반환합니다.
    pub async fn order_details(&self, order_id: &str, user: &AuthenticatedUser) -> Result<OrderDetailsResponse, AppError> {
        let order = self.order_repo
            .find_by_id(order_id)
            .await?
            .filter(|order| can_view(order, user))
            .ok_or_else(|| AppError::NotFound(format!("주문을 찾을 수 없습니다: {}", order_id)))?;

        let pin = if order.is_owned_by(&user.user_id) { order.pin.clone() } else { None };
        Ok(OrderDetailsResponse { order, pin })
    }

    /// `POST /api/mutations/cancel-order`
    pub async fn cancel(&self, user_id: &str, order_id: &str) -> Result<OrderStatus, AppError> {
        let order = self.owned_order(user_id, order_id).await?;
        order.status.ensure_transition(OrderStatus::Cancelled)?;

        self.order_repo.transition(order_id, order.status, OrderStatus::Cancelled).await?;
        log::info!("주문 취소: {} (user {})", order_id, user_id);
        Ok(OrderStatus::Cancelled)
    }

    /// `POST /api/shopper/accept-order`
    pub async fn accept(&self, shopper_id: &str, order_id: &str) -> Result<OrderStatus, AppError> {
        let order = self.existing_order(order_id).await?;
        if order.shopper_id.is_some() {
            return Err(AppError::ConflictError("이미 다른 쇼퍼가 수락한 주문입니다".to_string()));
        }
        order.status.ensure_transition(OrderStatus::Accepted)?;

        self.order_repo.assign_shopper(order_id, shopper_id).await?;
        log::info!("🛵 주문 수락: {} (shopper {})", order_id, shopper_id);
        Ok(OrderStatus::Accepted)
    }

    /// `POST /api/shopper/update-order-status`
    pub async fn update_status(&self, shopper_id: &str, request: &UpdateOrderStatusRequest) -> Result<OrderStatus, AppError> {
        let next: OrderStatus = request.status.parse()?;
        let order = self.existing_order(&request.order_id).await?;

        check_shopper_update(&order, shopper_id, next, request.pin.as_deref())?;

        self.order_repo.transition(&order.id, order.status, next).await?;
        log::info!("주문 {} 상태 변경: {} → {}", order.id, order.status, next);
        Ok(next)
    }

    async fn existing_order(&self, order_id: &str) -> Result<Order, AppError> {
        self.order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("주문을 찾을 수 없습니다: {}", order_id)))
    }

    async fn owned_order(&self, user_id: &str, order_id: &str) -> Result<Order, AppError> {
        let order = self.existing_order(order_id).await?;
        if !order.is_owned_by(user_id) {
            return Err(AppError::NotFound(format!("주문을 찾을 수 없습니다: {}", order_id)));
        }
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserRole;

    fn order(status: OrderStatus, shopper: Option<&str>) -> Order {
        serde_json::from_value(serde_json::json!({
            "id": "o-1",
            "user_id": "u-1",
            "shop_id": "s-1",
            "pin": "07",
            "status": status,
            "total": "100",
            "service_fee": "5",
            "delivery_fee": "10",
            "discount": "0",
            "delivery_address_id": "a-1",
            "shopper_id": shopper,
        }))
        .unwrap()
    }

    fn user(id: &str, role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser::new(id.to_string(), None, role)
    }

    #[test]
    fn test_visibility() {
        let o = order(OrderStatus::Accepted, Some("sh-1"));
        assert!(can_view(&o, &user("u-1", UserRole::User)));
        assert!(can_view(&o, &user("sh-1", UserRole::Shopper)));
        assert!(can_view(&o, &user("adm", UserRole::Admin)));
        assert!(!can_view(&o, &user("u-2", UserRole::User)));
        assert!(!can_view(&o, &user("sh-2", UserRole::Shopper)));
    }

    #[test]
    fn test_only_assigned_shopper_updates() {
        let o = order(OrderStatus::Accepted, Some("sh-1"));
        assert!(check_shopper_update(&o, "sh-1", OrderStatus::Shopping, None).is_ok());
        assert!(matches!(
            check_shopper_update(&o, "sh-2", OrderStatus::Shopping, None),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_skipping_a_step_conflicts() {
        let o = order(OrderStatus::Accepted, Some("sh-1"));
        assert!(matches!(
            check_shopper_update(&o, "sh-1", OrderStatus::Delivered, Some("07")),
            Err(AppError::ConflictError(_))
        ));
    }

    #[test]
    fn test_delivery_requires_matching_pin() {
        let o = order(OrderStatus::OnTheWay, Some("sh-1"));
        assert!(check_shopper_update(&o, "sh-1", OrderStatus::Delivered, Some("07")).is_ok());
        assert!(matches!(
            check_shopper_update(&o, "sh-1", OrderStatus::Delivered, Some("70")),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            check_shopper_update(&o, "sh-1", OrderStatus::Delivered, None),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_shopper_cannot_cancel() {
        let o = order(OrderStatus::Pending, Some("sh-1"));
        assert!(matches!(
            check_shopper_update(&o, "sh-1", OrderStatus::Cancelled, None),
            Err(AppError::AuthorizationError(_))
        ));
    }
}
