use serde::Deserialize;
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterReferrerRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(custom(function = "crate::domain::dto::auth::validate_phone"))]
    pub phone: Option<String>,
}
