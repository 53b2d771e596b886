//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로로 싱글톤으로 관리되며, `Arc<T>` 필드는
//! `ServiceLocator`에 등록된 리포지토리와 다른 서비스로 자동 주입됩니다.
//!
//! - [`auth`] - 세션 JWT 발급/검증
//! - [`users`] - 회원가입, 로그인, 내 정보
//! - [`pricing`] - 배송비/수수료 계산과 견적
//! - [`checkout`] - 단일 매장 체크아웃과 합배송
//! - [`orders`] - 주문 조회, 취소, 쇼퍼 진행 처리
//! - [`reels`] - 댓글과 좋아요
//! - [`referrals`] - 추천 코드와 통계
//! - [`shoppers`] - 쇼퍼 신청과 지갑
//! - [`business`] - RFQ와 견적
//! - [`refunds`] - 환불 요청
//! - [`catalog`] - 매장/상품 목록
//!
//! ```rust,ignore
//! use crate::services::{checkout::CheckoutService, pricing::FeeService};
//!
//! let checkout = CheckoutService::instance();
//! let fees = FeeService::instance();
//! ```

pub mod auth;
pub mod users;
pub mod pricing;
pub mod checkout;
pub mod orders;
pub mod reels;
pub mod referrals;
pub mod shoppers;
pub mod business;
pub mod refunds;
pub mod catalog;
