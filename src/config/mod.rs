//! # Configuration Module
//!
//! 환경 변수 기반 설정을 타입별 정적 접근자로 제공합니다.
//! `main`에서 `PROFILE`에 맞는 `.env` 파일을 먼저 로드합니다.
//!
//! - [`data_config`] - 서버, Hasura, Redis 캐시, Rate Limit, bcrypt
//! - [`auth_config`] - JWT 세션, 세션 쿠키, 사용자 역할
//! - [`pricing_config`] - 배송비, 서비스 수수료, 합배송, 출금 한도
//!
//! ## 환경 변수 예시
//!
//! ```bash
//! export HASURA_GRAPHQL_URL="https://hasura.example.com/v1/graphql"
//! export HASURA_GRAPHQL_ADMIN_SECRET="..."
//! export JWT_SECRET="..."
//! export REDIS_URL="redis://localhost:6379"
//! export DELIVERY_BASE_FEE="1000"
//! export SERVICE_FEE_PERCENT="5"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod pricing_config;

pub use data_config::*;
pub use auth_config::*;
pub use pricing_config::*;
