//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 리포지토리는 애그리게이트 하나당 하나이며, 모두 공유 [`HasuraClient`]를 통해
//! GraphQL로 데이터를 읽고 씁니다. 생성에 런타임 인프라(Hasura, Redis)가 필요하므로
//! `#[service]`처럼 지연 생성하지 않고 기동 시 [`register_all`]에서 한 번에
//! `ServiceLocator`에 등록합니다. 서비스는 `Arc<XxxRepository>` 필드로 주입받습니다.
//!
//! ```rust,ignore
//! let client = Arc::new(HasuraClient::new()?);
//! let cache = RedisClient::new().await.ok().map(Arc::new);
//! repositories::register_all(client, cache).await?;
//!
//! let orders = ServiceLocator::get::<OrderRepository>();
//! let order = orders.find_by_id("...").await?;
//! ```

use std::sync::Arc;
use crate::caching::redis::RedisClient;
use crate::config::CacheConfig;
use crate::core::registry::{Repository, ServiceLocator};
use crate::graphql::HasuraClient;
use crate::utils::display_terminal::print_component;

pub mod users;
pub mod catalog;
pub mod carts;
pub mod orders;
pub mod promotions;
pub mod reels;
pub mod shoppers;
pub mod referrals;
pub mod business;
pub mod refunds;

pub use users::UserRepository;
pub use catalog::CatalogRepository;
pub use carts::CartRepository;
pub use orders::OrderRepository;
pub use promotions::PromotionRepository;
pub use reels::ReelRepository;
pub use shoppers::ShopperRepository;
pub use referrals::ReferralRepository;
pub use business::BusinessRepository;
pub use refunds::RefundRepository;

/// [`Repository`] trait 구현을 생성합니다.
///
/// `impl_repository!(OrderRepository, "order", "Orders");`
#[macro_export]
macro_rules! impl_repository {
    ($ty:ty, $name:expr, $table:expr) => {
        #[async_trait::async_trait]
        impl $crate::core::registry::Repository for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn collection_name(&self) -> &str {
                $table
            }

            async fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
                log::debug!("📦 {} repository ready ({})", $name, $table);
                Ok(())
            }
        }
    };
}

/// 모든 리포지토리를 생성해 `ServiceLocator`에 등록하고 등록 수를 반환합니다.
///
/// `cache`가 `None`이면 카탈로그 조회는 캐시 없이 Hasura로 바로 갑니다.
pub async fn register_all(
    client: Arc<HasuraClient>,
    cache: Option<Arc<RedisClient>>,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut count = 0;

    count += register(UserRepository::new(client.clone())).await?;
    count += register(CatalogRepository::new(client.clone(), cache, CacheConfig::ttl_seconds())).await?;
    count += register(CartRepository::new(client.clone())).await?;
    count += register(OrderRepository::new(client.clone())).await?;
    count += register(PromotionRepository::new(client.clone())).await?;
    count += register(ReelRepository::new(client.clone())).await?;
    count += register(ShopperRepository::new(client.clone())).await?;
    count += register(ReferralRepository::new(client.clone())).await?;
    count += register(BusinessRepository::new(client.clone())).await?;
    count += register(RefundRepository::new(client)).await?;

    Ok(count)
}

async fn register<R: Repository + 'static>(repository: R) -> Result<usize, Box<dyn std::error::Error>> {
    repository.init().await?;
    print_component(repository.name(), repository.collection_name());
    ServiceLocator::set(Arc::new(repository));
    Ok(1)
}
