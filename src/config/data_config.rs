//! 서버, 데이터 계층, 환경 관련 설정
//!
//! 모든 값은 환경 변수에서 읽고, 없거나 파싱에 실패하면 기본값을 사용합니다.

use std::env;
use std::str::FromStr;

/// 환경 변수를 파싱하고 실패하면 기본값을 반환합니다.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} 파싱 실패 ({:?}), 기본값 사용", key, raw);
            default
        }),
        Err(_) => default,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string()));
        Self::from_str(&raw)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

pub struct PasswordConfig;

impl PasswordConfig {
    /// `BCRYPT_COST`가 4-15 범위면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost) = env::var("BCRYPT_COST").unwrap_or_default().parse::<u32>() {
            if (4..=15).contains(&cost) {
                return cost;
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env_or("PORT", 8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn workers() -> usize {
        env_or("WORKERS", 4)
    }

    /// CORS 허용 Origin 목록 (`ALLOWED_ORIGINS`, 콤마 구분)
    pub fn allowed_origins() -> Vec<String> {
        env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Hasura GraphQL 엔드포인트 설정
pub struct HasuraConfig;

impl HasuraConfig {
    pub fn endpoint() -> String {
        env::var("HASURA_GRAPHQL_URL")
            .unwrap_or_else(|_| "http://localhost:8081/v1/graphql".to_string())
    }

    /// 관리자 시크릿이 없으면 헤더 없이 요청합니다 (로컬 개발용).
    pub fn admin_secret() -> Option<String> {
        env::var("HASURA_GRAPHQL_ADMIN_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
    }

    pub fn timeout_seconds() -> u64 {
        env_or("HASURA_TIMEOUT_SECONDS", 15)
    }
}

pub struct CacheConfig;

impl CacheConfig {
    pub fn redis_url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    pub fn ttl_seconds() -> u64 {
        env_or("CACHE_TTL_SECONDS", 300)
    }
}

/// Rate Limiting 설정
#[derive(Debug)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn load() -> Self {
        Self {
            per_second: env_or("RATE_LIMIT_PER_SECOND", 100),
            burst_size: env_or("RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("stage"), Environment::Staging);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_env_or_falls_back_for_missing_key() {
        assert_eq!(env_or("MARKETPLACE_TEST_SURELY_UNSET_KEY", 42u32), 42);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }
        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
        if env::var("CACHE_TTL_SECONDS").is_err() {
            assert_eq!(CacheConfig::ttl_seconds(), 300);
        }
    }
}
