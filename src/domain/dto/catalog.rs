use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ShopIdQuery {
    pub shop_id: Option<String>,
}
