//! # Application Error Handling
//!
//! 마켓플레이스 API 전역에서 사용하는 에러 타입입니다.
//! 모든 핸들러는 `AppResult<HttpResponse>`를 반환하고, 에러는
//! `actix_web::ResponseError` 구현을 통해 `{"error": "..."}` 형태의
//! JSON 응답으로 자동 변환됩니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 필수 필드 누락, 재고 부족, 잘못된 PIN |
//! | `AuthenticationError` | 401 Unauthorized | 세션 없음, 잘못된 자격 증명 |
//! | `AuthorizationError` | 403 Forbidden | 다른 사용자의 리소스 수정 시도 |
//! | `NotFound` | 404 Not Found | 주문, 릴, 견적 등 리소스 없음 |
//! | `MethodNotAllowed` | 405 Method Not Allowed | 허용되지 않은 HTTP 메서드 |
//! | `ConflictError` | 409 Conflict | 중복 신청, 허용되지 않는 상태 전이 |
//! | `ExternalServiceError` | 500 Internal Server Error | Hasura 호출 실패 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn cancel(order: &Order, user_id: &str) -> AppResult<()> {
//!     if order.user_id != user_id {
//!         return Err(AppError::NotFound("주문을 찾을 수 없습니다".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 각 변형은 하나의 HTTP 상태 코드에 대응합니다. 5xx 계열은 메시지를
/// 그대로 응답 본문에 싣습니다 (호출 실패 원인을 클라이언트가 확인할 수 있도록).
#[derive(Error, Debug)]
pub enum AppError {
    /// 입력값 검증 실패 (400)
    ///
    /// 요청 본문 누락/파싱 실패, 필드 검증 실패, 재고 부족 등
    /// 클라이언트가 요청을 고쳐서 다시 보내야 하는 모든 경우입니다.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌 (409)
    ///
    /// 중복 생성 시도나 주문 상태 전이 규칙 위반에 사용합니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 허용되지 않은 HTTP 메서드 (405)
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// 외부 서비스(Hasura GraphQL) 호출 실패
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러에 대응하는 HTTP 상태 코드
    pub fn status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.status()
    }

    /// 모든 에러를 `{"error": "..."}` JSON으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status();

        if status.is_server_error() {
            log::error!("{}", self);
        }

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// ```rust,ignore
/// let hash = bcrypt::hash(&password, cost).context("비밀번호 해싱 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("shop_id is required".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Order not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("No session".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Not the author".to_string());
        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_method_not_allowed_response() {
        let error = AppError::MethodNotAllowed("PATCH".to_string());
        assert_eq!(error.error_response().status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("already applied".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_server_errors_map_to_500() {
        for error in [
            AppError::ExternalServiceError("hasura down".to_string()),
            AppError::InternalError("boom".to_string()),
        ] {
            assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_error_message_is_carried_in_display() {
        let error = AppError::ExternalServiceError("field 'foo' not found".to_string());
        assert!(error.to_string().contains("field 'foo' not found"));
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            _ => panic!("Expected InternalError"),
        }
    }
}
