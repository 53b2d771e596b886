//! # 요금 계산
//!
//! 배송비, 수량 할증, 서비스 수수료, 바우처 할인을 계산합니다.
//! 계산 함수는 모두 순수 함수이며 금액은 최소 단위 `i64`입니다.
//!
//! ## 배송비 구간
//!
//! ```text
//! 0 ─── free_distance_km ─────────── long_distance_km ───────────►
//!   base      + per_km_fee / km          + per_km_fee * multiplier / km
//! ```
//!
//! 부분 km는 시작된 km 단위로 올림합니다. 결과는 `delivery_fee_cap`으로 제한됩니다.

use std::sync::Arc;
use once_cell::sync::Lazy;
use singleton_macro::service;
use crate::config::PricingConfig;
use crate::core::errors::AppError;
use crate::domain::dto::QuoteRequest;
use crate::domain::entities::{Address, Cart, DiscountType, Promotion, Shop};
use crate::domain::models::{FeeBreakdown, GeoPoint};
use crate::repositories::{CartRepository, CatalogRepository, PromotionRepository};

const EARTH_RADIUS_KM: f64 = 6371.0;

static PRICING: Lazy<PricingConfig> = Lazy::new(PricingConfig::from_env);

/// 두 좌표 사이의 대원 거리 (km)
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

pub fn delivery_fee(distance_km: f64, cfg: &PricingConfig) -> i64 {
    let distance = if distance_km.is_finite() { distance_km.max(0.0) } else { 0.0 };

    let charged_km = (distance - cfg.free_distance_km).max(0.0).ceil();
    let long_km = (distance - cfg.long_distance_km.max(cfg.free_distance_km)).max(0.0).ceil();
    let normal_km = (charged_km - long_km).max(0.0);

    let fee = cfg.base_delivery_fee as f64
        + normal_km * cfg.per_km_fee as f64
        + long_km * cfg.per_km_fee as f64 * cfg.long_distance_multiplier;

    (fee.round() as i64).min(cfg.delivery_fee_cap)
}

pub fn units_surcharge(total_units: u32, cfg: &PricingConfig) -> i64 {
    total_units.saturating_sub(cfg.units_threshold) as i64 * cfg.per_extra_unit_fee
}

pub fn service_fee(subtotal: i64, cfg: &PricingConfig) -> i64 {
    let percent = (subtotal as f64 * cfg.service_fee_percent / 100.0).round() as i64;
    percent.max(cfg.min_service_fee)
}

/// 바우처 할인액. 비활성 바우처나 최소 주문 금액 미달은 `ValidationError`.
///
/// percent 바우처의 `value`는 백분율의 최소 단위 표현입니다 (10% → 1000).
pub fn promo_discount(subtotal: i64, promotion: &Promotion) -> Result<i64, AppError> {
    if !promotion.is_active {
        return Err(AppError::ValidationError(format!("사용할 수 없는 바우처입니다: {}", promotion.code)));
    }
    if !promotion.meets_minimum(subtotal) {
        return Err(AppError::ValidationError(format!(
            "바우처 {}의 최소 주문 금액을 충족하지 않습니다",
            promotion.code
        )));
    }

    let raw = match promotion.discount_type {
        DiscountType::Percent => subtotal.saturating_mul(promotion.value) / 10_000,
        DiscountType::Fixed => promotion.value,
    };

    Ok(raw.clamp(0, subtotal.max(0)))
}

/// 견적용: 적용할 수 없는 바우처는 할인 0
pub fn quote_discount(subtotal: i64, promotion: Option<&Promotion>) -> i64 {
    promotion
        .and_then(|p| promo_discount(subtotal, p).ok())
        .unwrap_or(0)
}

impl FeeBreakdown {
    /// 항목을 합산해 명세를 만듭니다. 합계는 0 미만이 되지 않습니다.
    pub fn compose(
        subtotal: i64,
        service_fee: i64,
        delivery_fee: i64,
        units_surcharge: i64,
        discount: i64,
        distance_km: f64,
    ) -> Self {
        let total = (subtotal + service_fee + delivery_fee + units_surcharge - discount).max(0);
        Self {
            subtotal,
            service_fee,
            delivery_fee,
            units_surcharge,
            discount,
            total,
            distance_km: (distance_km * 100.0).round() / 100.0,
        }
    }
}

pub fn quote(subtotal: i64, total_units: u32, distance_km: f64, discount: i64, cfg: &PricingConfig) -> FeeBreakdown {
    FeeBreakdown::compose(
        subtotal,
        service_fee(subtotal, cfg),
        delivery_fee(distance_km, cfg),
        units_surcharge(total_units, cfg),
        discount,
        distance_km,
    )
}

/// 요금 계산 서비스
///
/// 순수 계산 함수에 환경 설정과 Hasura 조회(장바구니, 매장, 배송지, 바우처)를 연결합니다.
/// 체크아웃과 합배송 서비스도 이 서비스를 통해 장바구니 가격을 매깁니다.
#[service(name = "fee")]
pub struct FeeService {
    cart_repo: Arc<CartRepository>,
    catalog_repo: Arc<CatalogRepository>,
    promotion_repo: Arc<PromotionRepository>,
}

impl FeeService {
    /// 캐시 없이 주어진 클라이언트로 리포지토리를 구성합니다.
    #[cfg(test)]
    pub(crate) fn with_client(client: Arc<crate::graphql::HasuraClient>) -> Self {
        Self {
            cart_repo: Arc::new(CartRepository::new(client.clone())),
            catalog_repo: Arc::new(CatalogRepository::new(client.clone(), None, 0)),
            promotion_repo: Arc::new(PromotionRepository::new(client)),
        }
    }

    pub fn config(&self) -> &'static PricingConfig {
        &PRICING
    }

    /// `POST /api/pricing/quote`
    pub async fn quote_cart(&self, user_id: &str, request: &QuoteRequest) -> Result<FeeBreakdown, AppError> {
        let cart = self.load_cart(user_id, &request.shop_id).await?;
        let shop = self.load_shop(&request.shop_id).await?;
        let address = self.load_address(&request.address_id, user_id).await?;

        let promotion = match &request.voucher_code {
            Some(code) => self.promotion_repo.find_by_code(code).await?,
            None => None,
        };

        let distance = haversine_km(shop.location(), address.location());
        let discount = quote_discount(cart.subtotal(), promotion.as_ref());

        Ok(quote(cart.subtotal(), cart.total_units(), distance, discount, self.config()))
    }

    /// 체크아웃용 바우처 조회. 없는 코드는 400.
    pub async fn resolve_voucher(&self, code: Option<&str>) -> Result<Option<Promotion>, AppError> {
        let Some(code) = code else {
            return Ok(None);
        };

        match self.promotion_repo.find_by_code(code).await? {
            Some(promotion) => Ok(Some(promotion)),
            None => Err(AppError::ValidationError(format!("존재하지 않는 바우처입니다: {}", code))),
        }
    }

    /// 장바구니가 없거나 비어 있으면 400
    pub async fn load_cart(&self, user_id: &str, shop_id: &str) -> Result<Cart, AppError> {
        match self.cart_repo.find_for_shop(user_id, shop_id).await? {
            Some(cart) if !cart.items.is_empty() => Ok(cart),
            _ => Err(AppError::ValidationError(format!("매장 {}의 장바구니가 비어 있습니다", shop_id))),
        }
    }

    pub async fn load_shop(&self, shop_id: &str) -> Result<Shop, AppError> {
        match self.catalog_repo.find_shop(shop_id).await? {
            Some(shop) if shop.is_active => Ok(shop),
            Some(_) => Err(AppError::ValidationError(format!("영업 중이 아닌 매장입니다: {}", shop_id))),
            None => Err(AppError::NotFound(format!("매장을 찾을 수 없습니다: {}", shop_id))),
        }
    }

    pub async fn load_address(&self, address_id: &str, user_id: &str) -> Result<Address, AppError> {
        let address = self.catalog_repo
            .find_address(address_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("배송지를 찾을 수 없습니다: {}", address_id)))?;

        if !address.location().is_valid() {
            return Err(AppError::ValidationError("배송지 좌표가 올바르지 않습니다".to_string()));
        }
        Ok(address)
    }
}
