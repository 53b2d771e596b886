//! 캐싱 계층
//!
//! - [`redis`] - Redis TTL 캐시 클라이언트
//! - [`keys`] - 캐시 키 규칙

pub mod redis;
pub mod keys;
