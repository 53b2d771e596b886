//! 요청/응답 DTO
//!
//! 요청 DTO는 `validator::Validate`를 구현하며 핸들러에서 `validate()?`로 검증합니다.
//! 금액 필드는 역직렬화 시점에 최소 단위 정수로 변환됩니다.

pub mod auth;
pub mod pricing;
pub mod orders;
pub mod reels;
pub mod referrals;
pub mod shoppers;
pub mod business;
pub mod refunds;
pub mod catalog;

pub use auth::*;
pub use pricing::*;
pub use orders::*;
pub use reels::*;
pub use referrals::*;
pub use shoppers::*;
pub use business::*;
pub use refunds::*;
pub use catalog::*;
