use std::sync::Arc;
use serde::Deserialize;
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::entities::{NewRefund, Refund, OPEN_REFUND_STATUSES};
use crate::graphql::HasuraClient;

const REFUND_FIELDS: &str = "id order_id user_id amount reason status created_at";

/// `Refunds` 테이블
pub struct RefundRepository {
    client: Arc<HasuraClient>,
}

#[derive(Deserialize)]
struct RefundsData {
    #[serde(rename = "Refunds")]
    refunds: Vec<Refund>,
}

impl RefundRepository {
    pub fn new(client: Arc<HasuraClient>) -> Self {
        Self { client }
    }

    pub async fn find_open_for_order(&self, order_id: &str) -> Result<Option<Refund>, AppError> {
        let query = format!(
            "query OpenRefund($order_id: uuid!, $statuses: [String!]!) {{ \
             Refunds(where: {{order_id: {{_eq: $order_id}}, status: {{_in: $statuses}}}}, limit: 1) {{ {} }} }}",
            REFUND_FIELDS
        );
        let data: RefundsData = self.client
            .request(&query, json!({ "order_id": order_id, "statuses": OPEN_REFUND_STATUSES }))
            .await?;
        Ok(data.refunds.into_iter().next())
    }

    pub async fn insert(&self, refund: &NewRefund) -> Result<Refund, AppError> {
        #[derive(Deserialize)]
        struct Inserted {
            #[serde(rename = "insert_Refunds_one")]
            refund: Option<Refund>,
        }

        let query = format!(
            "mutation InsertRefund($object: Refunds_insert_input!) {{ insert_Refunds_one(object: $object) {{ {} }} }}",
            REFUND_FIELDS
        );
        let data: Inserted = self.client.request(&query, json!({ "object": refund })).await?;

        data.refund
            .ok_or_else(|| AppError::ExternalServiceError("insert_Refunds_one 결과가 비어 있습니다".to_string()))
    }

    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Refund>, AppError> {
        let query = format!(
            "query UserRefunds($user_id: uuid!) {{ \
             Refunds(where: {{user_id: {{_eq: $user_id}}}}, order_by: {{created_at: desc}}) {{ {} }} }}",
            REFUND_FIELDS
        );
        let data: RefundsData = self.client.request(&query, json!({ "user_id": user_id })).await?;
        Ok(data.refunds)
    }
}

crate::impl_repository!(RefundRepository, "refund", "Refunds");
