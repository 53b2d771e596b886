//! # HTTP Request Handlers Module
//!
//! 라우트별 HTTP 핸들러입니다. 핸들러는 요청을 검증(`validate()?`)한 뒤
//! 싱글톤 서비스(`XxxService::instance()`)에 위임하고, 에러는 `AppError`를 통해
//! `{"error": "..."}` JSON 응답으로 변환됩니다.
//!
//! ```text
//! Client ──► routes ──► AuthMiddleware ──► handlers ──► services ──► repositories ──► Hasura
//! ```
//!
//! ## 공통 처리
//!
//! - [`method_not_allowed`] - 리소스별 기본 서비스, 405
//! - [`json_config`] / [`query_config`] - 본문/쿼리 파싱 실패를 400으로 변환
//!
//! ```rust,ignore
//! pub async fn checkout(user: AuthenticatedUser, payload: web::Json<CheckoutRequest>) -> AppResult<HttpResponse> {
//!     payload.validate()?;
//!     let response = CheckoutService::instance().checkout(&user.user_id, payload.into_inner()).await?;
//!     Ok(HttpResponse::Created().json(response))
//! }
//! ```

pub mod auth;
pub mod pricing;
pub mod checkout;
pub mod orders;
pub mod reels;
pub mod referrals;
pub mod shoppers;
pub mod business;
pub mod refunds;
pub mod catalog;
pub mod health;

use actix_web::{web, HttpRequest, HttpResponse};
use crate::core::errors::{AppError, AppResult};

/// 등록된 메서드가 없는 요청에 대한 기본 응답 (405)
pub async fn method_not_allowed(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed(format!("{} {}", req.method(), req.path())))
}

/// JSON 본문 누락/파싱 실패 → 400
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            log::debug!("JSON 파싱 실패: {}", err);
            AppError::ValidationError(format!("요청 본문이 올바르지 않습니다: {}", err)).into()
        })
}

/// 쿼리 문자열 파싱 실패 → 400
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("쿼리 파라미터가 올바르지 않습니다: {}", err)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Body {
        #[allow(dead_code)]
        name: String,
    }

    #[derive(Deserialize)]
    struct Page {
        #[allow(dead_code)]
        limit: i64,
    }

    async fn echo(_body: web::Json<Body>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn page(_query: web::Query<Page>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_unregistered_method_is_405() {
        let app = test::init_service(
            App::new().service(
                web::resource("/echo")
                    .route(web::post().to(echo))
                    .default_service(web::to(method_not_allowed)),
            ),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::delete().uri("/echo").to_request()).await;
        assert_eq!(resp.status(), 405);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap_or_default().contains("DELETE"));
    }

    #[actix_web::test]
    async fn test_malformed_json_is_400() {
        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .route("/echo", web::post().to(echo)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/echo")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body.get("error").is_some());

        // 필수 필드 누락도 400
        let req = test::TestRequest::post().uri("/echo").set_json(serde_json::json!({})).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn test_bad_query_is_400() {
        let app = test::init_service(
            App::new()
                .app_data(query_config())
                .route("/page", web::get().to(page)),
        )
        .await;

        let req = test::TestRequest::get().uri("/page?limit=ten").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);

        let req = test::TestRequest::get().uri("/page?limit=10").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
    }
}
