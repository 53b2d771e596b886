//! API 라우트 설정 모듈
//!
//! 모든 엔드포인트는 `/api` 스코프 아래에 있으며, 스코프 전체에 선택적 인증
//! (`AuthMiddleware::optional()`)을 적용합니다. 로그인이 필요한 핸들러는
//! `AuthenticatedUser` 추출자로 401을 반환하고, 쇼퍼 전용 리소스는
//! `required_with_role("shopper")`로 403을 반환합니다.
//!
//! 각 리소스는 등록되지 않은 메서드에 405를 돌려주도록 기본 서비스를 가집니다.
//!
//! | 경로 | 메서드 | 인증 |
//! |------|--------|------|
//! | `/health` | GET | - |
//! | `/api/auth/login`, `/api/auth/register` | POST | - |
//! | `/api/auth/session` | GET | 로그인 |
//! | `/api/pricing/quote` | POST | 로그인 |
//! | `/api/checkout` | POST | 로그인 |
//! | `/api/queries/shops`, `/api/queries/shop-products` | GET | - |
//! | `/api/queries/user-orders`, `/api/queries/order-details` | GET | 로그인 |
//! | `/api/queries/reel-comments` | GET / POST, PUT, DELETE | - / 로그인 |
//! | `/api/queries/reel-likes` | POST | 로그인 |
//! | `/api/mutations/create-combined-orders`, `/api/mutations/cancel-order` | POST | 로그인 |
//! | `/api/shopper/apply`, `/api/shopper/application` | POST, GET | 로그인 |
//! | `/api/shopper/accept-order`, `update-order-status`, `wallet`, `payout` | POST, GET | shopper |
//! | `/api/referrals/register`, `/api/referrals/stats` | POST, GET | 로그인 |
//! | `/api/business/rfqs`, `quotes`, `quotes/accept` | GET/POST | 로그인 |
//! | `/api/refunds` | GET, POST | 로그인 |
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::{web, Resource};
use crate::handlers;
use crate::middlewares::AuthMiddleware;

const SHOPPER_ROLE: &str = "shopper";

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(resource("/health").route(web::get().to(handlers::health::health_check)));

    cfg.service(
        web::scope("/api")
            .wrap(AuthMiddleware::optional())
            .configure(configure_auth_routes)
            .configure(configure_checkout_routes)
            .configure(configure_query_routes)
            .configure(configure_shopper_routes)
            .configure(configure_account_routes)
    );
}

/// 기본 서비스가 405인 리소스
fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(handlers::method_not_allowed))
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(resource("/login").route(web::post().to(handlers::auth::login)))
            .service(resource("/register").route(web::post().to(handlers::auth::register)))
            .service(resource("/session").route(web::get().to(handlers::auth::session)))
    );
}

/// 요금 견적, 체크아웃, 주문 변경
fn configure_checkout_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(resource("/pricing/quote").route(web::post().to(handlers::pricing::quote)));
    cfg.service(resource("/checkout").route(web::post().to(handlers::checkout::checkout)));

    cfg.service(
        web::scope("/mutations")
            .service(
                resource("/create-combined-orders")
                    .route(web::post().to(handlers::checkout::create_combined_orders)),
            )
            .service(resource("/cancel-order").route(web::post().to(handlers::orders::cancel_order)))
    );
}

fn configure_query_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/queries")
            .service(resource("/shops").route(web::get().to(handlers::catalog::shops)))
            .service(resource("/shop-products").route(web::get().to(handlers::catalog::shop_products)))
            .service(resource("/user-orders").route(web::get().to(handlers::orders::user_orders)))
            .service(resource("/order-details").route(web::get().to(handlers::orders::order_details)))
            .service(
                resource("/reel-comments")
                    .route(web::get().to(handlers::reels::list_comments))
                    .route(web::post().to(handlers::reels::create_comment))
                    .route(web::put().to(handlers::reels::update_comment))
                    .route(web::delete().to(handlers::reels::delete_comment)),
            )
            .service(resource("/reel-likes").route(web::post().to(handlers::reels::toggle_like)))
    );
}

/// 신청은 로그인한 누구나, 나머지는 shopper 역할
fn configure_shopper_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/shopper")
            .service(resource("/apply").route(web::post().to(handlers::shoppers::apply)))
            .service(resource("/application").route(web::get().to(handlers::shoppers::application)))
            .service(
                resource("/accept-order")
                    .route(web::post().to(handlers::orders::accept_order))
                    .wrap(AuthMiddleware::required_with_role(SHOPPER_ROLE)),
            )
            .service(
                resource("/update-order-status")
                    .route(web::post().to(handlers::orders::update_order_status))
                    .wrap(AuthMiddleware::required_with_role(SHOPPER_ROLE)),
            )
            .service(
                resource("/wallet")
                    .route(web::get().to(handlers::shoppers::wallet))
                    .wrap(AuthMiddleware::required_with_role(SHOPPER_ROLE)),
            )
            .service(
                resource("/payout")
                    .route(web::post().to(handlers::shoppers::payout))
                    .wrap(AuthMiddleware::required_with_role(SHOPPER_ROLE)),
            )
    );
}

/// 추천, B2B, 환불
fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/referrals")
            .service(resource("/register").route(web::post().to(handlers::referrals::register)))
            .service(resource("/stats").route(web::get().to(handlers::referrals::stats)))
    );

    cfg.service(
        web::scope("/business")
            .service(
                resource("/rfqs")
                    .route(web::get().to(handlers::business::list_rfqs))
                    .route(web::post().to(handlers::business::create_rfq)),
            )
            .service(resource("/quotes").route(web::post().to(handlers::business::submit_quote)))
            .service(resource("/quotes/accept").route(web::post().to(handlers::business::accept_quote)))
    );

    cfg.service(
        resource("/refunds")
            .route(web::get().to(handlers::refunds::list_refunds))
            .route(web::post().to(handlers::refunds::create_refund)),
    );
}
