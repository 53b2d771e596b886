//! 세션 JWT 관리 서비스
//!
//! HS256으로 서명한 세션 토큰을 발급하고 검증합니다.
//! 토큰은 `Authorization: Bearer` 헤더로 받고, 헤더가 없으면 세션 쿠키에서 찾습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;
use crate::config::JwtConfig;
use crate::core::errors::AppError;
use crate::domain::entities::User;
use crate::domain::models::{AuthenticatedUser, SessionClaims};

/// 세션 토큰 서비스
#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 사용자 세션 토큰과 만료까지 남은 초를 반환합니다.
    ///
    /// ```rust,ignore
    /// let (token, expires_in) = TokenService::instance().issue_session_token(&user)?;
    /// ```
    pub fn issue_session_token(&self, user: &User) -> Result<(String, i64), AppError> {
        let hours = JwtConfig::expiration_hours();
        let token = encode_session(user, hours, &JwtConfig::secret())?;
        Ok((token, hours * 3600))
    }

    /// 토큰 검증 후 클레임을 반환합니다. 만료, 서명 불일치, 형식 오류는 모두 401.
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        decode_session(token, &JwtConfig::secret())
    }

    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = self.verify_token(token)?;
        Ok(AuthenticatedUser::new(claims.sub, claims.email, claims.role))
    }

    /// "Bearer {token}" 형식에서 토큰 부분만 추출
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        match auth_header.strip_prefix("Bearer ").map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
        }
    }
}

fn encode_session(user: &User, hours: i64, secret: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: user.id.clone(),
        role: user.role,
        email: Some(user.email.clone()),
        iat: now.timestamp(),
        exp: (now + Duration::hours(hours)).timestamp(),
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::InternalError(format!("세션 토큰 생성 실패: {}", e)))
}

fn decode_session(token: &str, secret: &str) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
            }
            _ => {
                log::debug!("토큰 검증 실패: {}", e);
                AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
            }
        })
}
