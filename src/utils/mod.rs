//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 요청 필드 정리 및 필수값 검증
//! - [`money`] - 최소 단위 금액 변환 (Hasura numeric/text 컬럼)
//! - [`codes`] - 배송 PIN, 추천 코드 생성
//! - [`display_terminal`] - 기동 로그 포맷팅

pub mod string_utils;
pub mod money;
pub mod codes;
pub mod display_terminal;
