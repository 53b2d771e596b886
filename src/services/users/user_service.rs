//! # 사용자 서비스
//!
//! 회원가입, 이메일/비밀번호 로그인, 현재 세션 조회를 담당합니다.
//!
//! ## 회원가입 흐름
//!
//! ```text
//! RegisterRequest
//!   ├─ 이메일 중복 확인 ───────────── 409
//!   ├─ 추천인 코드 확인 (있을 때) ──── 400 (존재하지 않는 코드)
//!   ├─ bcrypt 해싱 (PasswordConfig::bcrypt_cost)
//!   ├─ 본인 추천 코드 발급 (충돌 시 최대 5회 재시도)
//!   ├─ Users insert
//!   ├─ Referrals insert (추천인이 있을 때, 실패해도 가입은 유지)
//!   └─ 세션 토큰 발급
//! ```

use std::sync::Arc;
use bcrypt::hash;
use singleton_macro::service;
use crate::config::{PasswordConfig, UserRole};
use crate::core::errors::{AppError, ErrorContext};
use crate::domain::dto::{LoginRequest, RegisterRequest, SessionResponse, UserResponse};
use crate::domain::entities::{NewReferral, NewUser, User, REFERRAL_STATUS_PENDING};
use crate::repositories::{ReferralRepository, UserRepository};
use crate::services::auth::TokenService;
use crate::services::referrals::allocate_referral_code;
use crate::utils::codes::is_well_formed_referral_code;

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    referral_repo: Arc<ReferralRepository>,
    token_service: Arc<TokenService>,
}

impl UserService {
    pub async fn register(&self, request: RegisterRequest) -> Result<SessionResponse, AppError> {
        let email = request.email.trim().to_lowercase();

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let referrer = match &request.referral_code {
            Some(code) if !is_well_formed_referral_code(&code.trim().to_uppercase()) => {
                return Err(AppError::ValidationError(format!("추천 코드 형식이 올바르지 않습니다: {}", code)));
            }
            Some(code) => Some(
                self.user_repo
                    .find_by_referral_code(code)
                    .await?
                    .ok_or_else(|| AppError::ValidationError(format!("존재하지 않는 추천 코드입니다: {}", code)))?,
            ),
            None => None,
        };

        let password_hash = hash(&request.password, PasswordConfig::bcrypt_cost()).context("비밀번호 해싱 실패")?;

        let name = request.name.trim().to_string();
        let referral_code = allocate_referral_code(&self.user_repo, &name).await?;

        let user = self.user_repo
            .create(NewUser {
                name,
                email,
                phone: Some(request.phone.trim().to_string()),
                password_hash,
                role: UserRole::User,
                referral_code,
                referred_by: referrer.as_ref().map(|r| r.id.clone()),
            })
            .await?;

        if let Some(referrer) = referrer {
            self.record_referral(&referrer, &user).await;
        }

        log::info!("✅ 회원가입 완료: {}", user.id);
        self.session_for(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<SessionResponse, AppError> {
        let user = self.verify_password(&request.email, &request.password).await?;
        log::info!("로그인: {}", user.id);
        self.session_for(user)
    }

    /// `GET /api/auth/session`
    pub async fn current_user(&self, user_id: &str) -> Result<UserResponse, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::AuthenticationError("세션 사용자를 찾을 수 없습니다".to_string()))
    }

    async fn verify_password(&self, email: &str, password: &str) -> Result<User, AppError> {
        let invalid = || AppError::AuthenticationError("잘못된 이메일 또는 비밀번호입니다".to_string());

        let user = self.user_repo.find_by_email(email).await?.ok_or_else(invalid)?;

        let Some(password_hash) = user.password_hash.as_deref().filter(|_| user.can_authenticate_with_password()) else {
            return Err(invalid());
        };

        let is_valid = bcrypt::verify(password, password_hash).context("비밀번호 검증 실패")?;

        if !is_valid {
            return Err(invalid());
        }
        Ok(user)
    }

    fn session_for(&self, user: User) -> Result<SessionResponse, AppError> {
        let (access_token, expires_in) = self.token_service.issue_session_token(&user)?;

        Ok(SessionResponse {
            user: UserResponse::from(user),
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        })
    }

    async fn record_referral(&self, referrer: &User, referred: &User) {
        let referral = NewReferral {
            referrer_id: referrer.id.clone(),
            referred_user_id: referred.id.clone(),
            code: referrer.referral_code.clone().unwrap_or_default(),
            status: REFERRAL_STATUS_PENDING,
        };

        if let Err(e) = self.referral_repo.insert(&referral).await {
            log::error!("추천 기록 실패 (referrer {}, user {}): {}", referrer.id, referred.id, e);
        }
    }
}
