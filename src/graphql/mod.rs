//! Hasura GraphQL 데이터 계층 접근
//!
//! 데이터 모델과 무결성은 Hasura(및 그 뒤의 관계형 DB)가 소유합니다.
//! 이 모듈은 요청 봉투 처리와 관리자 시크릿 전송만 담당합니다.

pub mod client;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{GraphqlResponse, HasuraClient, MutationResult, NoVariables};
