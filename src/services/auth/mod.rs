//! 세션 토큰 서비스
//!
//! HS256 JWT로 세션을 발급하고 검증합니다. 토큰은 `Authorization: Bearer`
//! 헤더나 세션 쿠키로 전달됩니다.

pub mod token_service;

pub use token_service::*;
