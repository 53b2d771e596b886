//! 캐시 키 규칙
//!
//! 키는 `catalog:` 네임스페이스 아래에 둡니다.

pub fn shops_key() -> String {
    "catalog:shops:active".to_string()
}

pub fn shop_products_key(shop_id: &str) -> String {
    format!("catalog:shop:{}:products", shop_id)
}
