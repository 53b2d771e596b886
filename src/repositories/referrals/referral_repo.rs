use std::sync::Arc;
use serde::Deserialize;
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::entities::{NewReferral, Referral, REFERRAL_STATUS_COMPLETED};
use crate::graphql::HasuraClient;

/// `Referrals` 테이블
pub struct ReferralRepository {
    client: Arc<HasuraClient>,
}

#[derive(Deserialize)]
struct Aggregate {
    aggregate: Count,
}

#[derive(Deserialize)]
struct Count {
    count: i64,
}

impl ReferralRepository {
    pub fn new(client: Arc<HasuraClient>) -> Self {
        Self { client }
    }

    pub async fn insert(&self, referral: &NewReferral) -> Result<Referral, AppError> {
        #[derive(Deserialize)]
        struct Inserted {
            #[serde(rename = "insert_Referrals_one")]
            referral: Option<Referral>,
        }

        let data: Inserted = self.client
            .request(
                "mutation InsertReferral($object: Referrals_insert_input!) { \
                 insert_Referrals_one(object: $object) { id referrer_id referred_user_id code status } }",
                json!({ "object": referral }),
            )
            .await?;

        data.referral
            .ok_or_else(|| AppError::ExternalServiceError("insert_Referrals_one 결과가 비어 있습니다".to_string()))
    }

    /// (전체 추천 수, 완료된 추천 수)
    pub async fn count_for_referrer(&self, referrer_id: &str) -> Result<(i64, i64), AppError> {
        #[derive(Deserialize)]
        struct Counts {
            total: Aggregate,
            completed: Aggregate,
        }

        let data: Counts = self.client
            .request(
                "query ReferralCounts($referrer_id: uuid!, $completed: String!) { \
                 total: Referrals_aggregate(where: {referrer_id: {_eq: $referrer_id}}) { aggregate { count } } \
                 completed: Referrals_aggregate(where: {referrer_id: {_eq: $referrer_id}, status: {_eq: $completed}}) { aggregate { count } } }",
                json!({ "referrer_id": referrer_id, "completed": REFERRAL_STATUS_COMPLETED }),
            )
            .await?;

        Ok((data.total.aggregate.count, data.completed.aggregate.count))
    }
}

crate::impl_repository!(ReferralRepository, "referral", "Referrals");
