//! 좌표 모델
//!
//! Hasura의 위경도 컬럼은 `text`인 경우가 많아 문자열과 숫자를 모두 받습니다.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

pub fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_accepts_text_and_number() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(deserialize_with = "deserialize_coordinate")]
            latitude: f64,
            #[serde(deserialize_with = "deserialize_coordinate")]
            longitude: f64,
        }

        let row: Row = serde_json::from_str(r#"{"latitude": "-1.9441", "longitude": 30.0619}"#).unwrap();
        assert!((row.latitude + 1.9441).abs() < 1e-9);
        assert!((row.longitude - 30.0619).abs() < 1e-9);

        assert!(serde_json::from_str::<Row>(r#"{"latitude": "north", "longitude": 1}"#).is_err());
    }

    #[test]
    fn test_geo_point_validity() {
        assert!(GeoPoint::new(-1.94, 30.06).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::NAN).is_valid());
    }
}
