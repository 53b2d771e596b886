//! # B2B 리포지토리
//!
//! `BusinessRFQ`, `BusinessQoute`, `BusinessContracts` 테이블을 다룹니다.
//! (`BusinessQoute`는 실제 스키마의 테이블 이름 그대로입니다.)
//!
//! 상태 전환은 "현재 상태가 X일 때만" 조건부 업데이트로 실행합니다.

use std::sync::Arc;
use serde::Deserialize;
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::entities::{
    BusinessContract, BusinessQuote, BusinessRfq, NewContract, NewQuote, NewRfq,
    QUOTE_ACCEPTED, QUOTE_PENDING, QUOTE_REJECTED, RFQ_CLOSED, RFQ_OPEN,
};
use crate::graphql::{HasuraClient, MutationResult};

const RFQ_FIELDS: &str = "id user_id title description quantity budget deadline status created_at";
const QUOTE_FIELDS: &str = "id rfq_id supplier_id amount delivery_days notes status";
const CONTRACT_FIELDS: &str = "id rfq_id quote_id buyer_id supplier_id amount status";

pub struct BusinessRepository {
    client: Arc<HasuraClient>,
}

impl BusinessRepository {
    pub fn new(client: Arc<HasuraClient>) -> Self {
        Self { client }
    }

    pub async fn insert_rfq(&self, rfq: &NewRfq) -> Result<BusinessRfq, AppError> {
        #[derive(Deserialize)]
        struct Inserted {
            #[serde(rename = "insert_BusinessRFQ_one")]
            rfq: Option<BusinessRfq>,
        }

        let query = format!(
            "mutation InsertRfq($object: BusinessRFQ_insert_input!) {{ insert_BusinessRFQ_one(object: $object) {{ {} }} }}",
            RFQ_FIELDS
        );
        let data: Inserted = self.client.request(&query, json!({ "object": rfq })).await?;

        data.rfq
            .ok_or_else(|| AppError::ExternalServiceError("insert_BusinessRFQ_one 결과가 비어 있습니다".to_string()))
    }

    /// 열린 RFQ 목록 (최신순)
    pub async fn list_open_rfqs(&self) -> Result<Vec<BusinessRfq>, AppError> {
        #[derive(Deserialize)]
        struct RfqData {
            #[serde(rename = "BusinessRFQ")]
            rfqs: Vec<BusinessRfq>,
        }

        let query = format!(
            "query OpenRfqs($status: String!) {{ \
             BusinessRFQ(where: {{status: {{_eq: $status}}}}, order_by: {{created_at: desc}}) {{ {} }} }}",
            RFQ_FIELDS
        );
        let data: RfqData = self.client.request(&query, json!({ "status": RFQ_OPEN })).await?;
        Ok(data.rfqs)
    }

    pub async fn find_rfq(&self, rfq_id: &str) -> Result<Option<BusinessRfq>, AppError> {
        #[derive(Deserialize)]
        struct RfqByPk {
            #[serde(rename = "BusinessRFQ_by_pk")]
            rfq: Option<BusinessRfq>,
        }

        let query = format!("query RfqById($id: uuid!) {{ BusinessRFQ_by_pk(id: $id) {{ {} }} }}", RFQ_FIELDS);
        let data: RfqByPk = self.client.request(&query, json!({ "id": rfq_id })).await?;
        Ok(data.rfq)
    }

    pub async fn insert_quote(&self, quote: &NewQuote) -> Result<BusinessQuote, AppError> {
        #[derive(Deserialize)]
        struct Inserted {
            #[serde(rename = "insert_BusinessQoute_one")]
            quote: Option<BusinessQuote>,
        }

        let query = format!(
            "mutation InsertQuote($object: BusinessQoute_insert_input!) {{ insert_BusinessQoute_one(object: $object) {{ {} }} }}",
            QUOTE_FIELDS
        );
        let data: Inserted = self.client.request(&query, json!({ "object": quote })).await?;

        data.quote
            .ok_or_else(|| AppError::ExternalServiceError("insert_BusinessQoute_one 결과가 비어 있습니다".to_string()))
    }

    pub async fn find_quote(&self, quote_id: &str) -> Result<Option<BusinessQuote>, AppError> {
        #[derive(Deserialize)]
        struct QuoteByPk {
            #[serde(rename = "BusinessQoute_by_pk")]
            quote: Option<BusinessQuote>,
        }

        let query = format!("query QuoteById($id: uuid!) {{ BusinessQoute_by_pk(id: $id) {{ {} }} }}", QUOTE_FIELDS);
        let data: QuoteByPk = self.client.request(&query, json!({ "id": quote_id })).await?;
        Ok(data.quote)
    }

    /// 열린 RFQ만 닫습니다. 이미 닫혔으면 `ConflictError`.
    ///
    /// 동시에 들어온 수락 요청 중 이 업데이트에 성공한 하나만 다음 단계로 진행합니다.
    pub async fn close_rfq(&self, rfq_id: &str) -> Result<(), AppError> {
        let affected = self.set_status("CloseRfq", "BusinessRFQ", rfq_id, RFQ_OPEN, RFQ_CLOSED).await?;
        if affected == 0 {
            return Err(AppError::ConflictError("이미 마감된 RFQ입니다".to_string()));
        }
        Ok(())
    }

    pub async fn reopen_rfq(&self, rfq_id: &str) -> Result<(), AppError> {
        self.set_status("ReopenRfq", "BusinessRFQ", rfq_id, RFQ_CLOSED, RFQ_OPEN).await?;
        Ok(())
    }

    /// 대기 중 견적만 `accepted`로 바꿉니다. 대기 상태가 아니면 `ConflictError`.
    pub async fn accept_pending_quote(&self, quote_id: &str) -> Result<(), AppError> {
        let affected = self.set_status("AcceptQuote", "BusinessQoute", quote_id, QUOTE_PENDING, QUOTE_ACCEPTED).await?;
        if affected == 0 {
            return Err(AppError::ConflictError("이미 처리된 견적입니다".to_string()));
        }
        Ok(())
    }

    pub async fn revert_quote(&self, quote_id: &str) -> Result<(), AppError> {
        self.set_status("RevertQuote", "BusinessQoute", quote_id, QUOTE_ACCEPTED, QUOTE_PENDING).await?;
        Ok(())
    }

    pub async fn insert_contract(&self, contract: &NewContract) -> Result<BusinessContract, AppError> {
        #[derive(Deserialize)]
        struct Inserted {
            #[serde(rename = "insert_BusinessContracts_one")]
            contract: Option<BusinessContract>,
        }

        let query = format!(
            "mutation InsertContract($object: BusinessContracts_insert_input!) {{ \
             insert_BusinessContracts_one(object: $object) {{ {} }} }}",
            CONTRACT_FIELDS
        );
        let data: Inserted = self.client.request(&query, json!({ "object": contract })).await?;

        data.contract
            .ok_or_else(|| AppError::ExternalServiceError("insert_BusinessContracts_one 결과가 비어 있습니다".to_string()))
    }

    /// 같은 RFQ의 나머지 대기 견적을 `rejected`로 바꾸고 바뀐 개수를 반환합니다.
    pub async fn reject_other_quotes(&self, rfq_id: &str, accepted_quote_id: &str) -> Result<i64, AppError> {
        #[derive(Deserialize)]
        struct Rejected {
            #[serde(rename = "update_BusinessQoute")]
            result: MutationResult,
        }

        let data: Rejected = self.client
            .request(
                "mutation RejectOtherQuotes($rfq_id: uuid!, $quote_id: uuid!, $pending: String!, $rejected: String!) { \
                 update_BusinessQoute(where: {rfq_id: {_eq: $rfq_id}, id: {_neq: $quote_id}, status: {_eq: $pending}}, \
                 _set: {status: $rejected}) { affected_rows } }",
                json!({
                    "rfq_id": rfq_id,
                    "quote_id": accepted_quote_id,
                    "pending": QUOTE_PENDING,
                    "rejected": QUOTE_REJECTED,
                }),
            )
            .await?;
        Ok(data.result.affected_rows)
    }

    /// `status`가 `from`인 행 하나를 `to`로 바꾸고 `affected_rows`를 반환합니다.
    async fn set_status(&self, operation: &str, table: &str, id: &str, from: &str, to: &str) -> Result<i64, AppError> {
        #[derive(Deserialize)]
        struct Updated {
            result: MutationResult,
        }

        let query = format!(
            "mutation {operation}($id: uuid!, $from: String!, $to: String!) {{ \
             result: update_{table}(where: {{id: {{_eq: $id}}, status: {{_eq: $from}}}}, _set: {{status: $to}}) {{ affected_rows }} }}"
        );
        let data: Updated = self.client
            .request(&query, json!({ "id": id, "from": from, "to": to }))
            .await?;
        Ok(data.result.affected_rows)
    }
}

crate::impl_repository!(BusinessRepository, "business", "BusinessRFQ");
