//! # B2B 견적 요청 (RFQ)
//!
//! 구매자가 RFQ를 올리면 다른 사용자가 견적을 제출하고,
//! 구매자가 견적 하나를 수락하면 계약이 만들어지고 RFQ가 닫힙니다.
//!
//! ```text
//! 수락 순서
//! 1. RFQ open → closed   (0행이면 409, 아무것도 쓰지 않음)
//! 2. 견적 pending → accepted (0행이면 409, RFQ 재개)
//! 3. 계약 insert         (실패 시 견적/RFQ 되돌림)
//! 4. 나머지 대기 견적 rejected (실패는 로그만)
//! ```

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::{CreateRfqRequest, SubmitQuoteRequest};
use crate::domain::entities::{
    BusinessContract, BusinessQuote, BusinessRfq, NewContract, NewQuote, NewRfq, CONTRACT_ACTIVE,
    QUOTE_PENDING, RFQ_OPEN,
};
use crate::repositories::BusinessRepository;
use crate::utils::money::format_minor_units;

/// 견적 제출 가능 여부: 본인 RFQ 불가(403), 닫힌 RFQ 불가(409)
pub fn check_quote_submission(rfq: &BusinessRfq, supplier_id: &str) -> Result<(), AppError> {
    if rfq.user_id == supplier_id {
        return Err(AppError::AuthorizationError("본인의 RFQ에는 견적을 제출할 수 없습니다".to_string()));
    }
    if !rfq.is_open() {
        return Err(AppError::ConflictError("마감된 RFQ입니다".to_string()));
    }
    Ok(())
}

/// 견적 수락 가능 여부: RFQ 작성자만(403), 대기 중 견적과 열린 RFQ만(409)
pub fn check_quote_acceptance(rfq: &BusinessRfq, quote: &BusinessQuote, buyer_id: &str) -> Result<(), AppError> {
    if rfq.user_id != buyer_id {
        return Err(AppError::AuthorizationError("RFQ 작성자만 견적을 수락할 수 있습니다".to_string()));
    }
    if !rfq.is_open() {
        return Err(AppError::ConflictError("마감된 RFQ입니다".to_string()));
    }
    if quote.status != QUOTE_PENDING {
        return Err(AppError::ConflictError(format!("이미 처리된 견적입니다 ({})", quote.status)));
    }
    Ok(())
}

#[service(name = "rfq")]
pub struct RfqService {
    business_repo: Arc<BusinessRepository>,
}

impl RfqService {
    pub async fn create_rfq(&self, user_id: &str, request: CreateRfqRequest) -> Result<BusinessRfq, AppError> {
        let rfq = NewRfq {
            user_id: user_id.to_string(),
            title: request.title.trim().to_string(),
            description: request.description,
            quantity: request.quantity,
            budget: request.budget.map(format_minor_units),
            deadline: request.deadline,
            status: RFQ_OPEN,
        };

        let created = self.business_repo.insert_rfq(&rfq).await?;
        log::info!("📋 RFQ 등록: {} (user {})", created.id, user_id);
        Ok(created)
    }

    pub async fn open_rfqs(&self) -> Result<Vec<BusinessRfq>, AppError> {
        self.business_repo.list_open_rfqs().await
    }

    pub async fn submit_quote(&self, supplier_id: &str, request: SubmitQuoteRequest) -> Result<BusinessQuote, AppError> {
        let rfq = self.existing_rfq(&request.rfq_id).await?;
        check_quote_submission(&rfq, supplier_id)?;

        let quote = NewQuote {
            rfq_id: rfq.id.clone(),
            supplier_id: supplier_id.to_string(),
            amount: request.amount,
            delivery_days: request.delivery_days,
            notes: request.notes,
            status: QUOTE_PENDING,
        };

        let created = self.business_repo.insert_quote(&quote).await?;
        log::info!("견적 제출: {} (rfq {}, supplier {})", created.id, rfq.id, supplier_id);
        Ok(created)
    }

    pub async fn accept_quote(&self, buyer_id: &str, quote_id: &str) -> Result<BusinessContract, AppError> {
        let quote = self.business_repo
            .find_quote(quote_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("견적을 찾을 수 없습니다: {}", quote_id)))?;
        let rfq = self.existing_rfq(&quote.rfq_id).await?;

        check_quote_acceptance(&rfq, &quote, buyer_id)?;

        let contract = NewContract {
            rfq_id: rfq.id.clone(),
            quote_id: quote.id.clone(),
            buyer_id: buyer_id.to_string(),
            supplier_id: quote.supplier_id.clone(),
            amount: quote.amount,
            status: CONTRACT_ACTIVE,
        };

        // RFQ를 먼저 닫은 요청만 계속 진행 (동시 수락은 409)
        self.business_repo.close_rfq(&rfq.id).await?;

        if let Err(e) = self.business_repo.accept_pending_quote(&quote.id).await {
            self.reopen_rfq(&rfq.id).await;
            return Err(e);
        }

        let created = match self.business_repo.insert_contract(&contract).await {
            Ok(created) => created,
            Err(e) => {
                log::error!("계약 생성 실패, quote {} / rfq {} 되돌림: {}", quote.id, rfq.id, e);
                if let Err(revert) = self.business_repo.revert_quote(&quote.id).await {
                    log::error!("견적 상태 복구 실패 (quote {}): {}", quote.id, revert);
                }
                self.reopen_rfq(&rfq.id).await;
                return Err(e);
            }
        };

        match self.business_repo.reject_other_quotes(&rfq.id, &quote.id).await {
            Ok(rejected) => log::debug!("rfq {}: 대기 견적 {}건 거절", rfq.id, rejected),
            Err(e) => log::warn!("나머지 견적 거절 실패 (rfq {}): {}", rfq.id, e),
        }

        log::info!("🤝 계약 체결: {} (rfq {}, quote {})", created.id, rfq.id, quote.id);
        Ok(created)
    }

    async fn reopen_rfq(&self, rfq_id: &str) {
        if let Err(e) = self.business_repo.reopen_rfq(rfq_id).await {
            log::error!("RFQ 재개 실패, {}이(가) 닫힌 채로 남아 있습니다: {}", rfq_id, e);
        }
    }

    async fn existing_rfq(&self, rfq_id: &str) -> Result<BusinessRfq, AppError> {
        self.business_repo
            .find_rfq(rfq_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("RFQ를 찾을 수 없습니다: {}", rfq_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use serde_json::{json, Value};
    use crate::domain::entities::{QUOTE_ACCEPTED, RFQ_CLOSED};
    use crate::graphql::testing::{data, FakeHasura};

    fn rfq(owner: &str, status: &str) -> BusinessRfq {
        BusinessRfq {
            id: "rfq-1".to_string(),
            user_id: owner.to_string(),
            title: "Office chairs".to_string(),
            description: None,
            quantity: 40,
            budget: Some(4_000_000),
            deadline: None,
            status: status.to_string(),
            created_at: None,
        }
    }

    fn quote(status: &str) -> BusinessQuote {
        BusinessQuote {
            id: "q-1".to_string(),
            rfq_id: "rfq-1".to_string(),
            supplier_id: "sup-1".to_string(),
            amount: 3_500_000,
            delivery_days: 7,
            notes: None,
            status: status.to_string(),
        }
    }

    #[test]
    fn test_cannot_quote_own_rfq() {
        assert!(matches!(
            check_quote_submission(&rfq("buyer", RFQ_OPEN), "buyer"),
            Err(AppError::AuthorizationError(_))
        ));
        assert!(check_quote_submission(&rfq("buyer", RFQ_OPEN), "sup-1").is_ok());
    }

    #[test]
    fn test_closed_rfq_conflicts() {
        assert!(matches!(
            check_quote_submission(&rfq("buyer", RFQ_CLOSED), "sup-1"),
            Err(AppError::ConflictError(_))
        ));
    }

    #[test]
    fn test_acceptance_rules() {
        let open = rfq("buyer", RFQ_OPEN);
        assert!(check_quote_acceptance(&open, &quote(QUOTE_PENDING), "buyer").is_ok());
        assert!(matches!(
            check_quote_acceptance(&open, &quote(QUOTE_PENDING), "someone"),
            Err(AppError::AuthorizationError(_))
        ));
        assert!(matches!(
            check_quote_acceptance(&open, &quote(QUOTE_ACCEPTED), "buyer"),
            Err(AppError::ConflictError(_))
        ));
    }

    fn updated(rows: i64) -> (StatusCode, Value) {
        data(json!({ "result": { "affected_rows": rows } }))
    }

    /// `close_rows`/`accept_rows`로 동시 수락 상황을 흉내 냅니다.
    fn acceptance_flow(close_rows: i64, accept_rows: i64) -> impl Fn(&str, &Value) -> (StatusCode, Value) + Send + Sync + 'static {
        move |op: &str, _: &Value| match op {
            "QuoteById" => data(json!({ "BusinessQoute_by_pk": serde_json::to_value(quote(QUOTE_PENDING)).unwrap() })),
            "RfqById" => data(json!({ "BusinessRFQ_by_pk": serde_json::to_value(rfq("buyer", RFQ_OPEN)).unwrap() })),
            "CloseRfq" => updated(close_rows),
            "AcceptQuote" => updated(accept_rows),
            "ReopenRfq" | "RevertQuote" => updated(1),
            "InsertContract" => data(json!({ "insert_BusinessContracts_one": {
                "id": "ct-1", "rfq_id": "rfq-1", "quote_id": "q-1", "buyer_id": "buyer",
                "supplier_id": "sup-1", "amount": "35000.00", "status": CONTRACT_ACTIVE
            } })),
            "RejectOtherQuotes" => data(json!({ "update_BusinessQoute": { "affected_rows": 2 } })),
            other => (StatusCode::OK, json!({ "errors": [{ "message": format!("unexpected {}", other) }] })),
        }
    }

    fn service_on(hasura: &FakeHasura) -> RfqService {
        RfqService { business_repo: Arc::new(BusinessRepository::new(hasura.client())) }
    }

    #[actix_web::test]
    async fn test_accept_quote_closes_rfq_before_contract() {
        let hasura = FakeHasura::start(acceptance_flow(1, 1));

        let contract = service_on(&hasura).accept_quote("buyer", "q-1").await.unwrap();
        assert_eq!(contract.id, "ct-1");
        assert_eq!(contract.amount, 3_500_000);
        assert_eq!(
            hasura.operations(),
            vec!["QuoteById", "RfqById", "CloseRfq", "AcceptQuote", "InsertContract", "RejectOtherQuotes"]
        );
    }

    #[actix_web::test]
    async fn test_rfq_already_closed_conflicts_without_contract() {
        let hasura = FakeHasura::start(acceptance_flow(0, 1));

        let err = service_on(&hasura).accept_quote("buyer", "q-1").await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));
        assert_eq!(hasura.operations(), vec!["QuoteById", "RfqById", "CloseRfq"]);
    }

    #[actix_web::test]
    async fn test_quote_no_longer_pending_reopens_rfq() {
        let hasura = FakeHasura::start(acceptance_flow(1, 0));

        let err = service_on(&hasura).accept_quote("buyer", "q-1").await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));

        let ops = hasura.operations();
        assert_eq!(ops.last().map(String::as_str), Some("ReopenRfq"));
        assert!(!ops.iter().any(|op| op == "InsertContract"));
    }

    #[actix_web::test]
    async fn test_contract_failure_restores_quote_and_rfq() {
        let flow = acceptance_flow(1, 1);
        let hasura = FakeHasura::start(move |op, vars| match op {
            "InsertContract" => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "insert failed" })),
            _ => flow(op, vars),
        });

        assert!(service_on(&hasura).accept_quote("buyer", "q-1").await.is_err());

        let ops = hasura.operations();
        assert!(ops.ends_with(&["RevertQuote".to_string(), "ReopenRfq".to_string()]));
        assert!(!ops.iter().any(|op| op == "RejectOtherQuotes"));
    }
}
