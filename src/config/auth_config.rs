//! 세션(JWT) 및 사용자 역할 설정

use std::env;
use serde::{Deserialize, Serialize};
use super::data_config::env_or;

pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "marketplace-session-secret".to_string()
            })
    }

    pub fn expiration_hours() -> i64 {
        env_or("JWT_EXPIRATION_HOURS", 24 * 30)
    }
}

pub struct SessionConfig;

impl SessionConfig {
    /// Bearer 헤더가 없을 때 세션 토큰을 찾는 쿠키 이름
    pub fn cookie_name() -> String {
        env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "session_token".to_string())
    }
}

/// Users 테이블의 `role` 컬럼 값
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Shopper,
    Admin,
}

impl UserRole {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "user" | "customer" => Ok(UserRole::User),
            "shopper" => Ok(UserRole::Shopper),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Unsupported role: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Shopper => "shopper",
            UserRole::Admin => "admin",
        }
    }

    /// 역할 기반 접근 제어에 사용하는 역할 목록
    ///
    /// 쇼퍼와 관리자도 일반 사용자 기능(주문, 댓글 등)을 쓸 수 있습니다.
    pub fn granted_roles(&self) -> Vec<String> {
        match self {
            UserRole::User => vec!["user".to_string()],
            UserRole::Shopper => vec!["user".to_string(), "shopper".to_string()],
            UserRole::Admin => vec!["user".to_string(), "admin".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_string() {
        assert_eq!(UserRole::from_str("user").unwrap(), UserRole::User);
        assert_eq!(UserRole::from_str("Customer").unwrap(), UserRole::User);
        assert_eq!(UserRole::from_str("SHOPPER").unwrap(), UserRole::Shopper);
        assert_eq!(UserRole::from_str("admin").unwrap(), UserRole::Admin);
        assert!(UserRole::from_str("courier").is_err());
    }

    #[test]
    fn test_role_serde_uses_lowercase() {
        let json = serde_json::to_string(&UserRole::Shopper).unwrap();
        assert_eq!(json, "\"shopper\"");
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }

    #[test]
    fn test_granted_roles() {
        assert_eq!(UserRole::User.granted_roles(), vec!["user"]);
        assert!(UserRole::Shopper.granted_roles().contains(&"shopper".to_string()));
        assert!(UserRole::Shopper.granted_roles().contains(&"user".to_string()));
        assert!(UserRole::Admin.granted_roles().contains(&"admin".to_string()));
    }

    #[test]
    fn test_session_cookie_default() {
        if env::var("SESSION_COOKIE_NAME").is_err() {
            assert_eq!(SessionConfig::cookie_name(), "session_token");
        }
    }
}
