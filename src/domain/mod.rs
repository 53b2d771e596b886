//! # Domain Layer Module
//!
//! Hasura 테이블 행과 API 계약을 표현하는 타입들입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - Hasura 행 미러 (Users, Orders, Reels ...)와 도메인 규칙
//! ├── dto       - 요청/응답 계약, validator 검증
//! └── models    - 세션 클레임, 인증 사용자, 좌표, 요금 명세
//! ```
//!
//! 엔티티는 서비스가 읽고 쓰는 필드만 가집니다. 금액은 모두 최소 단위 `i64`이며
//! Hasura의 decimal 텍스트는 역직렬화 시점에 변환됩니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::OrderStatus;
//!
//! let current = OrderStatus::Pending;
//! current.ensure_transition(OrderStatus::Accepted)?;   // ok
//! current.ensure_transition(OrderStatus::Delivered)?;  // 409
//! ```

pub mod entities;
pub mod dto;
pub mod models;

/// 미들웨어가 `crate::domain::auth::...` 경로로 참조합니다.
pub use models::auth;
