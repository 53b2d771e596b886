//! Users 테이블 행

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::config::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// 응답으로 절대 직렬화하지 않습니다.
    #[serde(default, skip_serializing)]
    pub password_hash: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub referred_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn can_authenticate_with_password(&self) -> bool {
        self.password_hash.as_deref().is_some_and(|h| !h.is_empty())
    }
}

/// 회원가입 시 Hasura에 넣는 행
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    pub referral_code: String,
    pub referred_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u-1",
            "name": "Aline",
            "email": "aline@example.com",
            "password_hash": "$2b$04$abc",
            "role": "user"
        }))
        .unwrap();

        assert!(user.can_authenticate_with_password());
        let out = serde_json::to_value(&user).unwrap();
        assert!(out.get("password_hash").is_none());
    }

    #[test]
    fn test_user_without_hash_cannot_use_password_login() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u-2", "name": "Eric", "email": "eric@example.com", "role": "shopper"
        }))
        .unwrap();

        assert!(!user.can_authenticate_with_password());
        assert_eq!(user.role, UserRole::Shopper);
    }
}
