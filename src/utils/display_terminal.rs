//! 기동 과정 출력 포맷팅
//!
//! 서비스 레지스트리 초기화 결과를 로그에 박스 형태로 남깁니다.

const BOX_WIDTH: usize = 50;

pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(BOX_WIDTH);

    log::info!("╔{}╗", border);
    log::info!("║{:^width$}║", title, width = BOX_WIDTH - 1);
    log::info!("╚{}╝", border);
}

pub fn print_component(name: &str, status: &str) {
    log::info!("   ├─ {}: {}", name, status);
}

/// `infrastructure`는 `ServiceLocator::set`으로 직접 등록된 컴포넌트 수입니다.
pub fn print_summary(infrastructure: usize, services: usize) {
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    log::info!("   📦 Infrastructure & repositories: {}", infrastructure);
    log::info!("   🔧 Services: {}", services);
    log::info!("   🚀 Total Components: {}", infrastructure + services);
}
