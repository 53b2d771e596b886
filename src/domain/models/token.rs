//! 세션 JWT 클레임

use serde::{Deserialize, Serialize};
use crate::config::UserRole;

/// HS256 세션 토큰 페이로드
///
/// - `sub`: Users.id
/// - `role`: 기본 역할 (`user` / `shopper` / `admin`)
/// - `iat`, `exp`: Unix timestamp (초)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
}
