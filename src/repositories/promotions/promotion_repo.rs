use std::sync::Arc;
use serde::Deserialize;
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::entities::Promotion;
use crate::graphql::HasuraClient;

/// `promotions` 테이블 (바우처 코드)
pub struct PromotionRepository {
    client: Arc<HasuraClient>,
}

impl PromotionRepository {
    pub fn new(client: Arc<HasuraClient>) -> Self {
        Self { client }
    }

    /// 코드는 대문자로 저장되어 있다고 가정하고 정규화해서 조회합니다.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Promotion>, AppError> {
        #[derive(Deserialize)]
        struct PromotionsData {
            promotions: Vec<Promotion>,
        }

        let data: PromotionsData = self.client
            .request(
                "query PromotionByCode($code: String!) { \
                 promotions(where: {code: {_eq: $code}}, limit: 1) { code discount_type value is_active min_order } }",
                json!({ "code": code.trim().to_uppercase() }),
            )
            .await?;

        Ok(data.promotions.into_iter().next())
    }
}

crate::impl_repository!(PromotionRepository, "promotion", "promotions");
