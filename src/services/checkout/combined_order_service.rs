//! # 합배송 주문
//!
//! 여러 매장의 장바구니를 `combined_order_id` 하나로 묶어 매장별 주문을 만듭니다.
//! 모든 매장의 재고 검증이 끝난 뒤에만 insert를 시작하고,
//! 중간에 실패하면 이번 요청에서 만든 주문을 모두 삭제합니다.

use std::collections::HashSet;
use std::sync::Arc;
use singleton_macro::service;
use uuid::Uuid;
use crate::config::PricingConfig;
use crate::core::errors::AppError;
use crate::domain::dto::{CheckoutResponse, CombinedCheckoutRequest, CombinedCheckoutResponse, StoreSelection};
use crate::domain::entities::Promotion;
use crate::domain::models::FeeBreakdown;
use crate::services::pricing::{delivery_fee, haversine_km, promo_discount, service_fee, units_surcharge, FeeService};
use super::checkout_service::{CheckoutService, DeliveryDetails, PreparedCart};

/// 요금 배분 입력 (매장 하나)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreLeg {
    pub subtotal: i64,
    pub total_units: u32,
    pub distance_km: f64,
}

/// 매장 선택을 검증하고 순서를 유지한 shop_id 목록을 돌려줍니다.
pub fn distinct_store_ids(stores: &[StoreSelection], max_stores: usize) -> Result<Vec<String>, AppError> {
    if stores.is_empty() {
        return Err(AppError::ValidationError("매장을 하나 이상 선택해주세요".to_string()));
    }
    if stores.len() > max_stores {
        return Err(AppError::ValidationError(format!(
            "한 번에 최대 {}개 매장까지 주문할 수 있습니다",
            max_stores
        )));
    }

    let mut seen = HashSet::new();
    let mut ids = Vec::with_capacity(stores.len());
    for store in stores {
        let id = store.shop_id.trim();
        if id.is_empty() {
            return Err(AppError::ValidationError("매장 ID가 비어 있습니다".to_string()));
        }
        if !seen.insert(id) {
            return Err(AppError::ValidationError(format!("중복된 매장입니다: {}", id)));
        }
        ids.push(id.to_string());
    }
    Ok(ids)
}

/// 매장별 요금을 배분합니다.
///
/// - 가장 먼 매장이 거리 기반 배송비 전액을 냅니다 (동일 거리면 먼저 선택한 매장).
/// - 나머지 매장은 `combined_extra_stop_fee`만 냅니다.
/// - 바우처 할인은 소계가 가장 큰 매장에 한 번만 적용합니다.
pub fn plan_combined_fees(
    legs: &[StoreLeg],
    promotion: Option<&Promotion>,
    cfg: &PricingConfig,
) -> Result<Vec<FeeBreakdown>, AppError> {
    let farthest = index_of_max(legs, |leg| leg.distance_km);
    let largest = index_of_max(legs, |leg| leg.subtotal as f64);

    let discount = match (promotion, largest) {
        (Some(p), Some(i)) => promo_discount(legs[i].subtotal, p)?,
        _ => 0,
    };

    let fees = legs
        .iter()
        .enumerate()
        .map(|(i, leg)| {
            let delivery = if Some(i) == farthest {
                delivery_fee(leg.distance_km, cfg)
            } else {
                cfg.combined_extra_stop_fee
            };
            FeeBreakdown::compose(
                leg.subtotal,
                service_fee(leg.subtotal, cfg),
                delivery,
                units_surcharge(leg.total_units, cfg),
                if Some(i) == largest { discount } else { 0 },
                leg.distance_km,
            )
        })
        .collect();

    Ok(fees)
}

fn index_of_max<F>(legs: &[StoreLeg], key: F) -> Option<usize>
where
    F: Fn(&StoreLeg) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, leg) in legs.iter().enumerate() {
        let value = key(leg);
        let value = if value.is_finite() { value } else { 0.0 };
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}

#[service(name = "combined_order")]
pub struct CombinedOrderService {
    checkout_service: Arc<CheckoutService>,
    fee_service: Arc<FeeService>,
}

impl CombinedOrderService {
    /// `POST /api/mutations/create-combined-orders`
    pub async fn create(&self, user_id: &str, request: CombinedCheckoutRequest) -> Result<CombinedCheckoutResponse, AppError> {
        let cfg = self.fee_service.config();
        let shop_ids = distinct_store_ids(&request.stores, cfg.max_combined_stores)?;
        log::info!("🛒 합배송 체크아웃 시작: user {}, {}개 매장", user_id, shop_ids.len());

        // 모든 매장을 먼저 검증
        let address = self.fee_service.load_address(&request.delivery_address_id, user_id).await?;
        let mut prepared: Vec<PreparedCart> = Vec::with_capacity(shop_ids.len());
        for shop_id in &shop_ids {
            prepared.push(self.checkout_service.prepare(user_id, shop_id).await?);
        }

        let promotion = self.fee_service.resolve_voucher(request.voucher_code.as_deref()).await?;
        let legs: Vec<StoreLeg> = prepared
            .iter()
            .map(|p| StoreLeg {
                subtotal: p.cart.subtotal(),
                total_units: p.cart.total_units(),
                distance_km: haversine_km(p.shop.location(), address.location()),
            })
            .collect();
        let fees = plan_combined_fees(&legs, promotion.as_ref(), cfg)?;

        let combined_order_id = Uuid::new_v4().to_string();
        let details = DeliveryDetails {
            delivery_address_id: request.delivery_address_id,
            delivery_time: request.delivery_time,
            delivery_notes: request.delivery_notes,
            voucher_code: promotion.map(|p| p.code),
        };

        let mut placed: Vec<CheckoutResponse> = Vec::with_capacity(prepared.len());
        for (cart, fee) in prepared.iter().zip(fees.iter()) {
            match self.checkout_service
                .place_order(user_id, cart, fee, &details, Some(&combined_order_id))
                .await
            {
                Ok(order) => placed.push(order),
                Err(e) => {
                    log::error!("합배송 {} 주문 생성 실패, {}건 롤백: {}", combined_order_id, placed.len(), e);
                    for order in &placed {
                        self.checkout_service.discard_order(&order.order_id).await;
                    }
                    return Err(AppError::InternalError(format!("합배송 주문 생성에 실패했습니다: {}", e)));
                }
            }
        }

        for cart in &prepared {
            self.checkout_service.teardown_cart(cart).await;
        }

        log::info!("✅ 합배송 완료: {} ({}건)", combined_order_id, placed.len());
        Ok(CombinedCheckoutResponse { combined_order_id, orders: placed })
    }
}
