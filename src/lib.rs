//! 배달 마켓플레이스 API 백엔드
//!
//! Hasura GraphQL을 데이터 계층으로 사용하는 Actix-web 서버입니다.
//! 세션 인증, 요금 계산, 체크아웃과 합배송, 주문 진행, 릴스 댓글/좋아요,
//! 추천 코드, 쇼퍼 온보딩과 출금, B2B 견적, 환불을 제공합니다.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/* 엔드포인트, 405 기본 서비스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증, 응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (#[service] 싱글톤)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← GraphQL 쿼리/뮤테이션
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Hasura + Redis  │ ← 데이터, 카탈로그 캐시
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use marketplace_backend::services::checkout::CheckoutService;
//!
//! let checkout = CheckoutService::instance();
//! let placed = checkout.checkout(&user_id, request).await?;
//! ```

pub mod core;
pub mod config;
pub mod graphql;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
