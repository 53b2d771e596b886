//! 마켓플레이스 API 메인 애플리케이션
//!
//! Hasura 클라이언트와 (선택적) Redis 캐시를 준비하고, 리포지토리와 서비스를
//! 등록한 뒤 Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use marketplace_backend::caching::redis::RedisClient;
use marketplace_backend::config::{RateLimitConfig, ServerConfig};
use marketplace_backend::core::registry::ServiceLocator;
use marketplace_backend::graphql::HasuraClient;
use marketplace_backend::handlers::{json_config, query_config};
use marketplace_backend::repositories;
use marketplace_backend::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 마켓플레이스 API 시작중...");

    let (hasura, redis_client) = initialize_data_stores().await?;

    // 핵심 클라이언트와 리포지토리 등록
    ServiceLocator::set(hasura.clone());

    let count = repositories::register_all(hasura, redis_client)
        .await
        .map_err(|e| io::Error::other(format!("리포지토리 등록 실패: {}", e)))?;
    info!("📦 리포지토리 {}개 등록", count);

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 접근 로그, 경로 정규화 미들웨어와
/// JSON/쿼리 파싱 실패를 400으로 바꾸는 설정을 포함합니다.
async fn start_http_server() -> io::Result<()> {
    let bind_address = (ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{}:{} 에서 실행중입니다", bind_address.0, bind_address.1);
    info!("📍 Health check: http://{}:{}/health", bind_address.0, bind_address.1);

    let rate_limit = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second,
        rate_limit.burst_size
    );

    HttpServer::new(move || {
        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(json_config())
            .app_data(query_config())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// PROFILE 환경변수에 따라 `.env.dev` / `.env.prod` / `.env`를 로드합니다
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG`가 없으면 `info,actix_web=info`
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// Hasura 클라이언트와 Redis 캐시를 준비합니다
///
/// Hasura 연결 확인 실패는 경고만 남깁니다 (Hasura가 늦게 뜨는 경우).
/// Redis는 선택 사항이며 연결에 실패하면 캐시 없이 동작합니다.
async fn initialize_data_stores() -> io::Result<(Arc<HasuraClient>, Option<Arc<RedisClient>>)> {
    info!("📡 Hasura 연결 확인 중...");

    let hasura = Arc::new(
        HasuraClient::new().map_err(|e| io::Error::other(format!("Hasura 클라이언트 생성 실패: {}", e)))?,
    );

    match hasura.ping().await {
        Ok(()) => info!("✅ Hasura 연결 성공: {}", hasura.endpoint()),
        Err(e) => warn!("⚠️ Hasura 연결 확인 실패 ({}): {}", hasura.endpoint(), e),
    }

    let redis_client = match RedisClient::new().await {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!("⚠️ Redis 연결 실패, 캐시 없이 실행합니다: {}", e);
            None
        }
    };

    Ok((hasura, redis_client))
}

/// CORS 설정 (`ALLOWED_ORIGINS`)
fn configure_cors() -> Cors {
    let cors = ServerConfig::allowed_origins()
        .into_iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(&origin));

    cors
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        // 세션 쿠키 전달
        .supports_credentials()
        .max_age(3600)
}
