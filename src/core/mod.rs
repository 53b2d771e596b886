//! # Core Framework Module
//!
//! 모든 계층이 공유하는 기반 기능입니다.
//!
//! - [`registry`] - `ServiceLocator` 싱글톤 컨테이너와 `#[service]` 자동 등록
//! - [`errors`] - `AppError`, `AppResult`, HTTP 상태 코드 매핑
//!
//! ```rust,ignore
//! use crate::core::{AppError, ServiceLocator};
//!
//! ServiceLocator::set(Arc::new(HasuraClient::new()?));
//! let checkout = CheckoutService::instance();
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
