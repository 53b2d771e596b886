//! # Service Registry
//!
//! 싱글톤 기반 의존성 주입 컨테이너입니다.
//!
//! - `#[service]` 매크로가 붙은 타입은 `inventory`를 통해 컴파일 타임에
//!   [`ServiceRegistration`]으로 수집되고, 첫 `instance()` 호출 시 생성됩니다.
//! - `HasuraClient`, `RedisClient`, 각 리포지토리처럼 런타임 설정이 필요한
//!   인프라 컴포넌트는 `main`에서 [`ServiceLocator::set`]으로 직접 등록합니다.
//!
//! ```text
//! main
//!  ├─ ServiceLocator::set(HasuraClient)      ← 인프라 등록
//!  ├─ repositories::register_all(RedisClient) ← 리포지토리 등록
//!  └─ ServiceLocator::initialize_all()       ← #[service] 인스턴스 생성
//!        └─ CheckoutService { cart_repo: ServiceLocator::get::<CartRepository>(), .. }
//! ```
//!
//! 서비스 조회는 타입 이름을 정규화한 키로 이루어집니다.
//! `CheckoutService`, `checkout_service`, `checkout`은 모두 같은 키 `checkout`이 됩니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::core::errors::{AppError, AppResult};
use crate::utils::display_terminal::{print_boxed_title, print_component, print_summary};

/// 비즈니스 서비스 공통 trait
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 컴포넌트 공통 trait
///
/// `collection_name`은 리포지토리가 주로 다루는 Hasura 테이블 이름입니다.
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);

static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    inventory::iter::<ServiceRegistration>()
        .map(|registration| (normalize_component_name(registration.name), registration))
        .collect()
});

/// 컴포넌트 이름을 조회 키로 정규화합니다.
///
/// 모듈 경로를 제거하고, 소문자로 바꾸고, `_`와 `service` 접미사를 제거합니다.
pub fn normalize_component_name(name: &str) -> String {
    let short = name.rsplit("::").next().unwrap_or(name);
    let flat: String = short
        .chars()
        .filter(|c| *c != '_')
        .flat_map(|c| c.to_lowercase())
        .collect();

    match flat.strip_suffix("service") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => flat,
    }
}

pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 등록된 인스턴스를 반환합니다. 없으면 `#[service]` 등록 정보로 생성합니다.
    ///
    /// # Panics
    ///
    /// 등록되지 않은 타입이거나 순환 참조가 감지되면 패닉합니다.
    /// 서비스 그래프는 기동 시점에 확정되므로 조기 실패가 맞습니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        match Self::try_get::<T>() {
            Ok(instance) => instance,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_get<T: 'static + Send + Sync>() -> AppResult<Arc<T>> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::lookup::<T>() {
            return Ok(instance);
        }

        {
            let mut initializing = LOCATOR
                .initializing
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if !initializing.insert(type_id) {
                return Err(AppError::InternalError(format!(
                    "Circular dependency detected: {} is already being initialized",
                    type_name
                )));
            }
        }

        // 생성자는 의존성을 ServiceLocator::get으로 다시 조회하므로
        // instances 락을 잡지 않은 상태에서 호출해야 합니다.
        let created = Self::construct::<T>(type_name);

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&type_id);

        let instance = created?;
        let mut instances = LOCATOR
            .instances
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let stored = instances
            .entry(type_id)
            .or_insert_with(|| instance as Arc<dyn Any + Send + Sync>)
            .clone();

        stored
            .downcast::<T>()
            .map_err(|_| AppError::InternalError(format!("Type mismatch in ServiceLocator: {}", type_name)))
    }

    fn lookup<T: 'static + Send + Sync>() -> Option<Arc<T>> {
        let instances = LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        instances
            .get(&TypeId::of::<T>())
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> AppResult<Arc<T>> {
        let key = normalize_component_name(type_name);

        let registration = SERVICE_NAME_CACHE.get(&key).ok_or_else(|| {
            AppError::InternalError(format!(
                "Service not found: {}. Register it with #[service] or ServiceLocator::set()",
                type_name
            ))
        })?;

        (registration.constructor)()
            .downcast::<Arc<T>>()
            .map(|boxed| *boxed)
            .map_err(|_| AppError::InternalError(format!("Type mismatch for service: {}", registration.name)))
    }

    /// 인프라 컴포넌트나 리포지토리를 직접 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_name = std::any::type_name::<T>();
        log::debug!("📦 Registering: {}", type_name.rsplit("::").next().unwrap_or(type_name));

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 현재 등록된 인스턴스 수
    pub fn registered_count() -> usize {
        LOCATOR
            .instances
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// 수집된 모든 `#[service]`를 미리 생성합니다.
    ///
    /// 인프라와 리포지토리는 이 호출 전에 `set`으로 등록되어 있어야 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let preregistered = Self::registered_count();
        let mut service_count = 0;

        for registration in inventory::iter::<ServiceRegistration>() {
            let _instance = (registration.constructor)();
            print_component(registration.name, "✓ Created");
            service_count += 1;
        }

        print_summary(preregistered, service_count);
        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    struct StubClient {
        label: &'static str,
    }

    #[test]
    fn test_normalize_component_name() {
        assert_eq!(normalize_component_name("CheckoutService"), "checkout");
        assert_eq!(normalize_component_name("checkout_service"), "checkout");
        assert_eq!(normalize_component_name("checkout"), "checkout");
        assert_eq!(
            normalize_component_name("marketplace_backend::services::orders::CombinedOrderService"),
            "combinedorder"
        );
        assert_eq!(normalize_component_name("combined_order"), "combinedorder");
        assert_eq!(normalize_component_name("service"), "service");
    }

    #[test]
    fn test_set_then_get_returns_same_instance() {
        ServiceLocator::set(Arc::new(StubClient { label: "stub" }));

        let first = ServiceLocator::get::<StubClient>();
        let second = ServiceLocator::get::<StubClient>();

        assert_eq!(first.label, "stub");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unregistered_type_is_an_error() {
        struct NeverRegistered;
        assert!(ServiceLocator::try_get::<NeverRegistered>().is_err());
    }
}
