//! 금액 표현 변환
//!
//! 내부 금액은 항상 최소 단위(1/100) 정수 `i64`입니다.
//! Hasura는 `numeric`/`text` 컬럼을 문자열 또는 숫자로 돌려주므로
//! 리포지토리 경계에서 이 모듈로 변환합니다.

use serde::{Deserialize, Deserializer, Serializer};
use crate::core::errors::AppError;

/// `"1500"`, `"1500.5"`, `"1500.50"` → 150050 같은 최소 단위 정수로 변환합니다.
pub fn parse_minor_units(raw: &str) -> Result<i64, AppError> {
    let raw = raw.trim();
    let invalid = || AppError::ValidationError(format!("invalid amount: {:?}", raw));

    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };

    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole_value: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| invalid())? };

    // 소수점 셋째 자리 이하는 버림
    let mut cents = fraction.chars().take(2).collect::<String>();
    while cents.len() < 2 {
        cents.push('0');
    }
    let cents_value: i64 = cents.parse().map_err(|_| invalid())?;

    let value = whole_value
        .checked_mul(100)
        .and_then(|v| v.checked_add(cents_value))
        .ok_or_else(invalid)?;

    Ok(if negative { -value } else { value })
}

/// 최소 단위 정수를 `"1500.50"` 형태 문자열로 변환합니다.
pub fn format_minor_units(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Hasura 금액 컬럼(문자열 또는 숫자)을 최소 단위로 역직렬화합니다.
pub fn deserialize_minor_units<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    let text = match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    };

    parse_minor_units(&text).map_err(serde::de::Error::custom)
}

pub fn deserialize_optional_minor_units<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "deserialize_minor_units")] i64);

    Option::<Wrapper>::deserialize(deserializer).map(|opt| opt.map(|Wrapper(v)| v))
}

/// 최소 단위를 Hasura에 보낼 때 사용하는 문자열 직렬화
pub fn serialize_minor_units<S>(amount: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_minor_units(*amount))
}
