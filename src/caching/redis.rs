//! Redis 기반 TTL 캐시
//!
//! 매장 목록, 매장별 상품 목록처럼 자주 읽히고 잠깐 오래되어도 괜찮은
//! 카탈로그 조회 결과를 JSON 문자열로 저장합니다.
//! 캐시 실패는 호출 측에서 무시하고 Hasura로 바로 조회합니다.

use redis::{AsyncCommands, Client};
use redis::aio::ConnectionManager;
use serde::{Serialize, de::DeserializeOwned};
use crate::config::CacheConfig;

#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(CacheConfig::redis_url())?;
        let mut manager = ConnectionManager::new(client).await?;

        // 연결 테스트
        redis::cmd("PING").query_async::<()>(&mut manager).await?;
        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string()))),
            None => Ok(None),
        }
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> Result<(), redis::RedisError> {
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;

        let mut conn = self.manager.clone();
        conn.set_ex(key, json, seconds).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.del(key).await
    }
}
