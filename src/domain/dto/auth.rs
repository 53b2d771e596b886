//! 인증 요청/응답 DTO

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::config::UserRole;
use crate::domain::entities::User;
use crate::utils::string_utils::deserialize_optional_string;

/// 이메일/비밀번호 로그인
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 회원가입
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "이름은 1-100자 사이여야 합니다"))]
    pub name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,

    /// 추천인 코드 (선택)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub referral_code: Option<String>,
}

/// 숫자와 선행 `+`만 허용, 숫자 9-15자리
pub(crate) fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.trim().strip_prefix('+').unwrap_or(phone.trim());
    if digits.len() < 9 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("invalid_phone")
            .with_message("전화번호 형식이 올바르지 않습니다".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub referral_code: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User { id, name, email, phone, role, referral_code, .. } = user;
        Self { id, name, email, phone, role, referral_code }
    }
}

/// 로그인/회원가입 응답 (JWT 포함)
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            name: "Aline".to_string(),
            email: "aline@example.com".to_string(),
            phone: "+250788123456".to_string(),
            password: "longenough".to_string(),
            referral_code: None,
        };
        assert!(ok.validate().is_ok());

        let bad = RegisterRequest {
            email: "not-an-email".to_string(),
            phone: "07-88".to_string(),
            password: "short".to_string(),
            ..ok
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_blank_referral_code_is_dropped() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "name": "Eric", "email": "eric@example.com", "phone": "0788123456",
            "password": "longenough", "referral_code": "   "
        }))
        .unwrap();
        assert!(req.referral_code.is_none());
    }
}
