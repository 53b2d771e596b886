//! Referrals 테이블

use serde::{Deserialize, Serialize};

pub const REFERRAL_STATUS_PENDING: &str = "pending";
pub const REFERRAL_STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Referral {
    pub id: String,
    pub referrer_id: String,
    pub referred_user_id: String,
    pub code: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReferral {
    pub referrer_id: String,
    pub referred_user_id: String,
    pub code: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferralStats {
    pub code: Option<String>,
    pub referred: i64,
    pub completed: i64,
}
