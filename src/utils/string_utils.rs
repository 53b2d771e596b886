//! # 문자열 유틸리티
//!
//! 요청 필드 정리와 검증에 쓰이는 공통 함수들입니다.

use serde::Deserialize;
use crate::core::errors::AppError;

pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// `#[serde(default, deserialize_with = "...")]`와 함께 사용합니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 쿼리 문자열의 필수 파라미터를 꺼냅니다.
pub fn require_param<'a>(value: &'a Option<String>, field_name: &str) -> Result<&'a str, AppError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::ValidationError(format!("{} is required", field_name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some(" gate 3 ".to_string())), Some("gate 3".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct Notes {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            delivery_notes: Option<String>,
        }

        let notes: Notes = serde_json::from_str(r#"{"delivery_notes": "  ring twice "}"#).unwrap();
        assert_eq!(notes.delivery_notes, Some("ring twice".to_string()));

        let notes: Notes = serde_json::from_str(r#"{"delivery_notes": "   "}"#).unwrap();
        assert_eq!(notes.delivery_notes, None);

        let notes: Notes = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(notes.delivery_notes, None);
    }

    #[test]
    fn test_require_param() {
        assert_eq!(require_param(&Some(" abc ".to_string()), "reel_id").unwrap(), "abc");
        assert!(require_param(&Some("  ".to_string()), "reel_id").is_err());
        assert!(require_param(&None, "reel_id").is_err());
    }
}
