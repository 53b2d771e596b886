//! Hasura GraphQL 클라이언트
//!
//! 애플리케이션 전체에서 하나만 생성해 `ServiceLocator`에 등록합니다.
//! 모든 요청은 관리자 시크릿(`x-hasura-admin-secret`)으로 전송되므로
//! 권한 검사는 이 클라이언트를 호출하기 전에 서비스 계층에서 끝나야 합니다.

use std::time::Duration;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use crate::config::HasuraConfig;
use crate::core::errors::{AppError, AppResult};

const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// `{ "data": ..., "errors": [...] }` 응답 봉투
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

impl<T> GraphqlResponse<T> {
    /// `errors`가 하나라도 있으면 실패로 간주합니다 (부분 성공 데이터는 버림).
    pub fn into_result(self) -> AppResult<T> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AppError::ExternalServiceError(message));
        }

        self.data
            .ok_or_else(|| AppError::ExternalServiceError("GraphQL 응답에 data가 없습니다".to_string()))
    }
}

/// `update_*`/`delete_*` 뮤테이션의 공통 응답 형태
#[derive(Debug, Deserialize)]
pub struct MutationResult {
    pub affected_rows: i64,
}

/// 아무 변수도 없는 쿼리에 사용
#[derive(Debug, Serialize)]
pub struct NoVariables {}

pub struct HasuraClient {
    http: reqwest::Client,
    endpoint: String,
    admin_secret: Option<String>,
}

impl HasuraClient {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::with_endpoint(
            HasuraConfig::endpoint(),
            HasuraConfig::admin_secret(),
            Duration::from_secs(HasuraConfig::timeout_seconds()),
        )?)
    }

    pub fn with_endpoint(endpoint: String, admin_secret: Option<String>, timeout: Duration) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        if admin_secret.is_none() {
            log::warn!("HASURA_GRAPHQL_ADMIN_SECRET not set, requests are sent without admin secret");
        }

        Ok(Self { http, endpoint, admin_secret })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GraphQL 쿼리/뮤테이션 하나를 실행하고 `data`를 `T`로 역직렬화합니다.
    pub async fn request<V, T>(&self, query: &str, variables: V) -> AppResult<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let mut builder = self.http
            .post(&self.endpoint)
            .json(&GraphqlRequest { query, variables });

        if let Some(secret) = &self.admin_secret {
            builder = builder.header(ADMIN_SECRET_HEADER, secret);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Hasura 요청 실패: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Hasura 응답 오류 ({}): {}", status, error_text
            )));
        }

        response
            .json::<GraphqlResponse<T>>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Hasura 응답 파싱 실패: {}", e)))?
            .into_result()
    }

    /// 기동 시 연결 확인용
    pub async fn ping(&self) -> AppResult<()> {
        #[derive(Deserialize)]
        struct Typename {
            #[serde(rename = "__typename")]
            _typename: String,
        }

        self.request::<_, Typename>("query { __typename }", NoVariables {})
            .await
            .map(|_| ())
    }
}
