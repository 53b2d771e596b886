//! 배송비/수수료 계산 설정
//!
//! 금액 환경 변수는 통화 단위(`"1000"`, `"1000.50"`)로 적고,
//! 내부에서는 최소 단위 정수로 보관합니다.

use std::env;
use super::data_config::env_or;
use crate::utils::money::parse_minor_units;

#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    /// 기본 배송비 (`free_distance_km`까지 포함)
    pub base_delivery_fee: i64,
    pub free_distance_km: f64,
    /// `free_distance_km` 초과 km당 요금
    pub per_km_fee: i64,
    /// 이 거리를 넘는 km에는 `long_distance_multiplier`를 곱합니다.
    pub long_distance_km: f64,
    pub long_distance_multiplier: f64,
    pub delivery_fee_cap: i64,
    /// 이 수량을 넘는 상품 개수마다 `per_extra_unit_fee` 추가
    pub units_threshold: u32,
    pub per_extra_unit_fee: i64,
    pub service_fee_percent: f64,
    pub min_service_fee: i64,
    /// 합배송에서 가장 먼 매장을 제외한 매장마다 붙는 추가 정차 요금
    pub combined_extra_stop_fee: i64,
    pub max_combined_stores: usize,
    pub min_payout: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_delivery_fee: 100_000,
            free_distance_km: 3.0,
            per_km_fee: 30_000,
            long_distance_km: 10.0,
            long_distance_multiplier: 1.5,
            delivery_fee_cap: 500_000,
            units_threshold: 10,
            per_extra_unit_fee: 5_000,
            service_fee_percent: 5.0,
            min_service_fee: 20_000,
            combined_extra_stop_fee: 50_000,
            max_combined_stores: 5,
            min_payout: 100_000,
        }
    }
}

impl PricingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_delivery_fee: amount_or("DELIVERY_BASE_FEE", defaults.base_delivery_fee),
            free_distance_km: env_or("DELIVERY_FREE_DISTANCE_KM", defaults.free_distance_km),
            per_km_fee: amount_or("DELIVERY_PER_KM_FEE", defaults.per_km_fee),
            long_distance_km: env_or("DELIVERY_LONG_DISTANCE_KM", defaults.long_distance_km),
            long_distance_multiplier: env_or("DELIVERY_LONG_DISTANCE_MULTIPLIER", defaults.long_distance_multiplier),
            delivery_fee_cap: amount_or("DELIVERY_FEE_CAP", defaults.delivery_fee_cap),
            units_threshold: env_or("UNITS_SURCHARGE_THRESHOLD", defaults.units_threshold),
            per_extra_unit_fee: amount_or("UNITS_SURCHARGE_FEE", defaults.per_extra_unit_fee),
            service_fee_percent: env_or("SERVICE_FEE_PERCENT", defaults.service_fee_percent),
            min_service_fee: amount_or("SERVICE_FEE_MIN", defaults.min_service_fee),
            combined_extra_stop_fee: amount_or("COMBINED_EXTRA_STOP_FEE", defaults.combined_extra_stop_fee),
            max_combined_stores: env_or("MAX_COMBINED_STORES", defaults.max_combined_stores),
            min_payout: amount_or("MIN_PAYOUT", defaults.min_payout),
        }
    }
}

fn amount_or(key: &str, default: i64) -> i64 {
    match env::var(key) {
        Ok(raw) => parse_minor_units(&raw).unwrap_or_else(|_| {
            log::warn!("{} 금액 파싱 실패 ({:?}), 기본값 사용", key, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let cfg = PricingConfig::default();
        assert!(cfg.free_distance_km < cfg.long_distance_km);
        assert!(cfg.base_delivery_fee <= cfg.delivery_fee_cap);
        assert!(cfg.long_distance_multiplier >= 1.0);
        assert!(cfg.max_combined_stores >= 1);
    }

    #[test]
    fn test_amount_or_missing_key_uses_default() {
        assert_eq!(amount_or("MARKETPLACE_TEST_UNSET_AMOUNT", 12_345), 12_345);
    }
}
