use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::config::UserRole;
use crate::core::AppError;

/// 세션 토큰에서 추출된 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Users.id
    pub user_id: String,

    pub email: Option<String>,

    /// 토큰에 기록된 기본 역할
    pub role: UserRole,

    /// 기본 역할이 포함하는 역할 목록 (`UserRole::granted_roles`)
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn new(user_id: String, email: Option<String>, role: UserRole) -> Self {
        Self { user_id, email, roles: role.granted_roles(), role }
    }

    /// 특정 역할을 보유하고 있는지 확인
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin.as_str())
    }
}

/// 인증 미들웨어가 넣어 둔 사용자를 꺼냅니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            )
            .into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_roles_follow_primary_role() {
        let admin = AuthenticatedUser::new("u-1".to_string(), None, UserRole::Admin);
        assert!(admin.is_admin());
        assert!(admin.has_role("user"));
        assert!(!admin.has_role("shopper"));

        let shopper = AuthenticatedUser::new("u-2".to_string(), None, UserRole::Shopper);
        assert!(shopper.has_role("shopper"));
        assert!(!shopper.is_admin());
    }

    #[actix_web::test]
    async fn test_extractor_without_session_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let err = AuthenticatedUser::extract(&req).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_extractor_reads_request_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut()
            .insert(AuthenticatedUser::new("u-3".to_string(), None, UserRole::User));

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user.user_id, "u-3");
    }
}
