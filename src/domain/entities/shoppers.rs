//! shoppers 신청서와 지갑

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::errors::AppError;
use crate::utils::money::{deserialize_minor_units, serialize_minor_units};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Foot,
    Bicycle,
    Motorcycle,
    Car,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Foot => "foot",
            Self::Bicycle => "bicycle",
            Self::Motorcycle => "motorcycle",
            Self::Car => "car",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "foot" => Ok(Self::Foot),
            "bicycle" => Ok(Self::Bicycle),
            "motorcycle" => Ok(Self::Motorcycle),
            "car" => Ok(Self::Car),
            other => Err(AppError::ValidationError(format!(
                "transport_mode는 foot, bicycle, motorcycle, car 중 하나여야 합니다 (입력값: {})",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopperApplication {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub phone: String,
    pub national_id: String,
    pub transport_mode: TransportMode,
    pub address: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewShopperApplication {
    pub user_id: String,
    pub full_name: String,
    pub phone: String,
    pub national_id: String,
    pub transport_mode: TransportMode,
    pub address: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub shopper_id: String,
    #[serde(deserialize_with = "deserialize_minor_units", serialize_with = "serialize_minor_units")]
    pub available_balance: i64,
    #[serde(deserialize_with = "deserialize_minor_units", serialize_with = "serialize_minor_units")]
    pub reserved_balance: i64,
}

impl Wallet {
    /// 출금 요청 검증. 통과하면 (새 가용 잔액, 새 예약 잔액)
    pub fn reserve_payout(&self, amount: i64, min_payout: i64) -> Result<(i64, i64), AppError> {
        if amount <= 0 {
            return Err(AppError::ValidationError("출금 금액은 0보다 커야 합니다".to_string()));
        }
        if amount < min_payout {
            return Err(AppError::ValidationError(format!(
                "최소 출금 금액은 {}입니다",
                crate::utils::money::format_minor_units(min_payout)
            )));
        }
        if amount > self.available_balance {
            return Err(AppError::ValidationError("출금 금액이 가용 잔액을 초과합니다".to_string()));
        }
        Ok((self.available_balance - amount, self.reserved_balance + amount))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub id: String,
    pub wallet_id: String,
    #[serde(deserialize_with = "deserialize_minor_units", serialize_with = "serialize_minor_units")]
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewWalletTransaction {
    pub wallet_id: String,
    #[serde(serialize_with = "serialize_minor_units")]
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub status: &'static str,
}
