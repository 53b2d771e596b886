//! 요금 계산 결과

use serde::Serialize;
use crate::utils::money::serialize_minor_units;

/// 주문 한 건의 요금 명세 (최소 단위)
///
/// `total = subtotal + service_fee + delivery_fee + units_surcharge - discount`,
/// 음수가 되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeeBreakdown {
    #[serde(serialize_with = "serialize_minor_units")]
    pub subtotal: i64,
    #[serde(serialize_with = "serialize_minor_units")]
    pub service_fee: i64,
    #[serde(serialize_with = "serialize_minor_units")]
    pub delivery_fee: i64,
    #[serde(serialize_with = "serialize_minor_units")]
    pub units_surcharge: i64,
    #[serde(serialize_with = "serialize_minor_units")]
    pub discount: i64,
    #[serde(serialize_with = "serialize_minor_units")]
    pub total: i64,
    pub distance_km: f64,
}
