//! 추천 코드 발급과 추천 통계

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::RegisterReferrerRequest;
use crate::domain::entities::ReferralStats;
use crate::repositories::{ReferralRepository, UserRepository};
use crate::utils::codes::generate_referral_code;

pub const MAX_CODE_ATTEMPTS: usize = 5;

/// 사용되지 않은 추천 코드를 만듭니다. 5번 모두 충돌하면 500.
pub async fn allocate_referral_code(user_repo: &UserRepository, name: &str) -> Result<String, AppError> {
    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let code = generate_referral_code(name);
        if !user_repo.referral_code_exists(&code).await? {
            return Ok(code);
        }
        log::debug!("추천 코드 충돌 ({}/{}): {}", attempt, MAX_CODE_ATTEMPTS, code);
    }

    Err(AppError::InternalError("추천 코드를 생성하지 못했습니다".to_string()))
}

#[service(name = "referral")]
pub struct ReferralService {
    user_repo: Arc<UserRepository>,
    referral_repo: Arc<ReferralRepository>,
}

impl ReferralService {
    /// 호출자를 추천인으로 등록하고 추천 코드를 반환합니다. 이미 코드가 있으면 그대로 반환.
    pub async fn register_referrer(&self, user_id: &str, request: RegisterReferrerRequest) -> Result<String, AppError> {
        let user = self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        if let Some(code) = user.referral_code.filter(|c| !c.is_empty()) {
            return Ok(code);
        }

        let code = allocate_referral_code(&self.user_repo, &user.name).await?;
        if self.user_repo.set_referral_code(user_id, &code, request.phone.as_deref()).await? {
            log::info!("추천 코드 발급: {} → {}", user_id, code);
            return Ok(code);
        }

        // 동시에 다른 요청이 먼저 발급한 경우
        self.user_repo
            .find_by_id(user_id)
            .await?
            .and_then(|u| u.referral_code)
            .ok_or_else(|| AppError::InternalError("추천 코드 저장에 실패했습니다".to_string()))
    }

    pub async fn stats(&self, user_id: &str) -> Result<ReferralStats, AppError> {
        let user = self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        let (referred, completed) = self.referral_repo.count_for_referrer(user_id).await?;

        Ok(ReferralStats {
            code: user.referral_code,
            referred,
            completed,
        })
    }
}
