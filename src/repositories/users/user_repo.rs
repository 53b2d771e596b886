//! # 사용자 리포지토리
//!
//! Hasura `Users` 테이블에 대한 데이터 액세스를 담당합니다.
//! 이메일은 소문자로 정규화해서 저장하고 조회합니다.

use std::sync::Arc;
use serde::Deserialize;
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::entities::{NewUser, User};
use crate::graphql::{HasuraClient, MutationResult};

const USER_FIELDS: &str = "id name email phone password_hash role referral_code referred_by created_at";

pub struct UserRepository {
    client: Arc<HasuraClient>,
}

#[derive(Deserialize)]
struct UsersData {
    #[serde(rename = "Users")]
    users: Vec<User>,
}

#[derive(Deserialize)]
struct UserByPk {
    #[serde(rename = "Users_by_pk")]
    user: Option<User>,
}

impl UserRepository {
    pub fn new(client: Arc<HasuraClient>) -> Self {
        Self { client }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let query = format!(
            "query UserByEmail($email: String!) {{ Users(where: {{email: {{_eq: $email}}}}, limit: 1) {{ {} }} }}",
            USER_FIELDS
        );

        let data: UsersData = self.client
            .request(&query, json!({ "email": email.trim().to_lowercase() }))
            .await?;

        Ok(data.users.into_iter().next())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let query = format!("query UserById($id: uuid!) {{ Users_by_pk(id: $id) {{ {} }} }}", USER_FIELDS);

        let data: UserByPk = self.client.request(&query, json!({ "id": id })).await?;
        Ok(data.user)
    }

    pub async fn find_by_referral_code(&self, code: &str) -> Result<Option<User>, AppError> {
        let query = format!(
            "query UserByReferralCode($code: String!) {{ Users(where: {{referral_code: {{_eq: $code}}}}, limit: 1) {{ {} }} }}",
            USER_FIELDS
        );

        let data: UsersData = self.client
            .request(&query, json!({ "code": code.trim().to_uppercase() }))
            .await?;

        Ok(data.users.into_iter().next())
    }

    pub async fn referral_code_exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.find_by_referral_code(code).await?.is_some())
    }

    /// 새 사용자 저장 (이메일 중복 검사는 서비스 계층 담당)
    pub async fn create(&self, user: NewUser) -> Result<User, AppError> {
        #[derive(Deserialize)]
        struct Inserted {
            #[serde(rename = "insert_Users_one")]
            user: Option<User>,
        }

        let query = format!(
            "mutation InsertUser($object: Users_insert_input!) {{ insert_Users_one(object: $object) {{ {} }} }}",
            USER_FIELDS
        );

        let mut object = serde_json::to_value(&user)
            .map_err(|e| AppError::InternalError(format!("사용자 직렬화 실패: {}", e)))?;
        object["email"] = json!(user.email.trim().to_lowercase());

        let data: Inserted = self.client.request(&query, json!({ "object": object })).await?;

        data.user
            .ok_or_else(|| AppError::ExternalServiceError("insert_Users_one 결과가 비어 있습니다".to_string()))
    }

    /// 추천 코드가 아직 없을 때만 설정합니다. 이미 있으면 `false`.
    pub async fn set_referral_code(&self, user_id: &str, code: &str, phone: Option<&str>) -> Result<bool, AppError> {
        #[derive(Deserialize)]
        struct Updated {
            #[serde(rename = "update_Users")]
            result: MutationResult,
        }

        let mut set = json!({ "referral_code": code });
        if let Some(phone) = phone {
            set["phone"] = json!(phone);
        }

        let data: Updated = self.client
            .request(
                "mutation SetReferralCode($id: uuid!, $set: Users_set_input!) { \
                 update_Users(where: {id: {_eq: $id}, referral_code: {_is_null: true}}, _set: $set) { affected_rows } }",
                json!({ "id": user_id, "set": set }),
            )
            .await?;

        Ok(data.result.affected_rows > 0)
    }
}

crate::impl_repository!(UserRepository, "user", "Users");
