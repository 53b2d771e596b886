//! 쇼퍼 신청과 출금 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::{TransportMode, Wallet, WalletTransaction};
use crate::utils::money::deserialize_minor_units;

#[derive(Debug, Deserialize, Validate)]
pub struct ShopperApplicationRequest {
    #[validate(length(min = 2, max = 100, message = "이름은 2-100자 사이여야 합니다"))]
    pub full_name: String,

    #[validate(custom(function = "crate::domain::dto::auth::validate_phone"))]
    pub phone: String,

    #[validate(length(min = 4, max = 32, message = "신분증 번호 형식이 올바르지 않습니다"))]
    pub national_id: String,

    /// 문자열로 받아 서비스에서 `TransportMode`로 변환 (알 수 없는 값은 400)
    #[validate(length(min = 1, message = "transport_mode가 필요합니다"))]
    pub transport_mode: String,

    #[validate(length(min = 1, max = 255, message = "주소를 입력해주세요"))]
    pub address: String,
}

impl ShopperApplicationRequest {
    pub fn transport_mode(&self) -> Result<TransportMode, crate::core::AppError> {
        self.transport_mode.parse()
    }
}

#[derive(Debug, Deserialize)]
pub struct PayoutRequest {
    /// 최소 단위로 변환된 금액
    #[serde(deserialize_with = "deserialize_minor_units")]
    pub amount: i64,
}

/// 지갑 잔액과 최근 거래
#[derive(Debug, Clone, Serialize)]
pub struct WalletResponse {
    pub wallet: Wallet,
    pub transactions: Vec<WalletTransaction>,
}
