//! # 체크아웃 서비스
//!
//! 장바구니 하나를 주문 하나로 바꿉니다.
//!
//! ```text
//! 1. 장바구니 조회 (없거나 비었으면 400)
//! 2. 상품 재고 조회
//! 3. 수량 비교 (재고 초과, 비활성, 없는 상품 → 400)
//! 4. 요금 계산 (매장/배송지 좌표)
//! 5. 두 자리 배송 PIN 생성
//! 6. Orders insert (PENDING)
//! 7. Order_Items insert ── 실패 시 6번 주문 삭제 (보상)
//! 8. 장바구니 삭제 ─────── 실패해도 주문은 유지 (로그만)
//! ```
//!
//! 1-3단계는 [`CheckoutService::prepare`]로 분리되어 합배송에서도 재사용됩니다.

use std::collections::HashMap;
use std::sync::Arc;
use singleton_macro::service;
use crate::config::PricingConfig;
use crate::core::errors::AppError;
use crate::domain::dto::{CheckoutRequest, CheckoutResponse};
use crate::domain::entities::{Cart, NewOrder, NewOrderItem, OrderStatus, Product, Promotion, Shop};
use crate::domain::models::FeeBreakdown;
use crate::repositories::{CartRepository, CatalogRepository, OrderRepository};
use crate::services::pricing::{haversine_km, promo_discount, quote, FeeService};
use crate::utils::codes::generate_delivery_pin;

/// 재고 확인까지 끝난 매장별 장바구니
#[derive(Debug, Clone)]
pub struct PreparedCart {
    pub cart: Cart,
    pub shop: Shop,
}

/// 주문 insert에 필요한 공통 배송 정보
#[derive(Debug, Clone)]
pub struct DeliveryDetails {
    pub delivery_address_id: String,
    pub delivery_time: Option<String>,
    pub delivery_notes: Option<String>,
    pub voucher_code: Option<String>,
}

/// 장바구니 수량을 재고와 비교합니다. 문제가 있는 상품을 모두 모아 한 번에 400으로 알립니다.
pub fn validate_stock(cart: &Cart, products: &[Product]) -> Result<(), AppError> {
    let by_id: HashMap<&str, &Product> = products.iter().map(|p| (p.id.as_str(), p)).collect();

    // 같은 상품이 여러 줄에 나뉘어 있을 수 있으므로 합산
    let mut requested: Vec<(&str, i64)> = Vec::new();
    for item in &cart.items {
        match requested.iter_mut().find(|(id, _)| *id == item.product_id) {
            Some((_, qty)) => *qty += item.quantity,
            None => requested.push((item.product_id.as_str(), item.quantity)),
        }
    }

    let mut problems = Vec::new();
    for (product_id, quantity) in requested {
        match by_id.get(product_id) {
            None => problems.push(format!("{} (판매하지 않는 상품)", product_id)),
            Some(product) if !product.is_active => problems.push(format!("{} (판매 중지)", product.name)),
            Some(_) if quantity <= 0 => problems.push(format!("{} (수량 오류)", product_id)),
            Some(product) if quantity > product.quantity => problems.push(format!(
                "{} (요청 {}, 재고 {})",
                product.name, quantity, product.quantity
            )),
            Some(_) => {}
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!("재고가 부족한 상품이 있습니다: {}", problems.join(", "))))
    }
}

#[service(name = "checkout")]
pub struct CheckoutService {
    fee_service: Arc<FeeService>,
    catalog_repo: Arc<CatalogRepository>,
    order_repo: Arc<OrderRepository>,
    cart_repo: Arc<CartRepository>,
}

impl CheckoutService {
    #[cfg(test)]
    pub(crate) fn with_client(client: Arc<crate::graphql::HasuraClient>) -> Self {
        Self {
            fee_service: Arc::new(FeeService::with_client(client.clone())),
            catalog_repo: Arc::new(CatalogRepository::new(client.clone(), None, 0)),
            order_repo: Arc::new(OrderRepository::new(client.clone())),
            cart_repo: Arc::new(CartRepository::new(client)),
        }
    }

    /// `POST /api/checkout`
    pub async fn checkout(&self, user_id: &str, request: CheckoutRequest) -> Result<CheckoutResponse, AppError> {
        log::info!("🛒 체크아웃 시작: user {}, shop {}", user_id, request.shop_id);

        let prepared = self.prepare(user_id, &request.shop_id).await?;

        // 4. 요금
        let address = self.fee_service.load_address(&request.delivery_address_id, user_id).await?;
        let promotion = self.fee_service.resolve_voucher(request.voucher_code.as_deref()).await?;
        let distance = haversine_km(prepared.shop.location(), address.location());
        let fees = price_single(&prepared.cart, distance, promotion.as_ref(), self.fee_service.config())?;

        let details = DeliveryDetails {
            delivery_address_id: request.delivery_address_id,
            delivery_time: request.delivery_time,
            delivery_notes: request.delivery_notes,
            voucher_code: promotion.map(|p| p.code),
        };

        // 5-7
        let placed = self.place_order(user_id, &prepared, &fees, &details, None).await?;

        // 8
        self.teardown_cart(&prepared).await;

        log::info!("✅ 체크아웃 완료: order {}", placed.order_id);
        Ok(placed)
    }

    /// 1-3단계: 장바구니 조회, 재고 조회, 재고 검증
    pub async fn prepare(&self, user_id: &str, shop_id: &str) -> Result<PreparedCart, AppError> {
        let cart = self.fee_service.load_cart(user_id, shop_id).await?;
        let shop = self.fee_service.load_shop(shop_id).await?;

        let products = self.catalog_repo.find_products(&cart.product_ids()).await?;
        validate_stock(&cart, &products)?;

        log::debug!("재고 확인 완료: shop {}, {}개 품목", shop_id, cart.items.len());
        Ok(PreparedCart { cart, shop })
    }

    /// 5-7단계: PIN 생성, 주문 저장, 주문 항목 저장 (실패 시 주문 삭제)
    pub async fn place_order(
        &self,
        user_id: &str,
        prepared: &PreparedCart,
        fees: &FeeBreakdown,
        details: &DeliveryDetails,
        combined_order_id: Option<&str>,
    ) -> Result<CheckoutResponse, AppError> {
        let pin = generate_delivery_pin();

        let order = NewOrder {
            user_id: user_id.to_string(),
            shop_id: prepared.shop.id.clone(),
            combined_order_id: combined_order_id.map(str::to_string),
            pin: pin.clone(),
            status: OrderStatus::Pending,
            total: fees.total,
            service_fee: fees.service_fee,
            delivery_fee: fees.delivery_fee + fees.units_surcharge,
            discount: fees.discount,
            voucher_code: details.voucher_code.clone().filter(|_| fees.discount > 0),
            delivery_address_id: details.delivery_address_id.clone(),
            delivery_time: details.delivery_time.clone(),
            delivery_notes: details.delivery_notes.clone(),
        };

        let order_id = self.order_repo.insert(&order).await?;
        log::info!("주문 생성: {} (shop {})", order_id, prepared.shop.id);

        let items: Vec<NewOrderItem> = prepared.cart.items
            .iter()
            .map(|item| NewOrderItem {
                order_id: order_id.clone(),
                product_id: item.product_id.clone(),
                quantity: item.quantity,
                price: item.price,
            })
            .collect();

        if let Err(e) = self.order_repo.insert_items(&items).await {
            log::error!("주문 항목 저장 실패, 주문 {} 삭제: {}", order_id, e);
            self.discard_order(&order_id).await;
            return Err(e);
        }

        Ok(CheckoutResponse {
            order_id,
            shop_id: prepared.shop.id.clone(),
            pin,
            fees: *fees,
        })
    }

    /// 8단계: 장바구니 삭제. 실패는 로그만 남깁니다.
    pub async fn teardown_cart(&self, prepared: &PreparedCart) {
        if let Err(e) = self.cart_repo.delete_cart(&prepared.cart.id).await {
            log::error!("장바구니 삭제 실패 (cart {}): {}", prepared.cart.id, e);
        }
        self.catalog_repo.invalidate_shop_products(&prepared.shop.id).await;
    }

    /// 보상 삭제 (best-effort)
    pub async fn discard_order(&self, order_id: &str) {
        if let Err(e) = self.order_repo.delete(order_id).await {
            log::error!("보상 삭제 실패, 주문 {}이(가) 남아 있습니다: {}", order_id, e);
        }
    }
}

/// 단일 매장 주문의 요금 (바우처는 엄격 검증)
pub fn price_single(
    cart: &Cart,
    distance_km: f64,
    promotion: Option<&Promotion>,
    cfg: &PricingConfig,
) -> Result<FeeBreakdown, AppError> {
    let subtotal = cart.subtotal();
    let discount = match promotion {
        Some(p) => promo_discount(subtotal, p)?,
        None => 0,
    };
    Ok(quote(subtotal, cart.total_units(), distance_km, discount, cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use serde_json::json;
    use crate::domain::entities::{CartItem, DiscountType};
    use crate::graphql::testing::{checkout_flow, FakeHasura};

    fn product(id: &str, stock: i64, active: bool) -> Product {
        Product {
            id: id.to_string(),
            shop_id: "s-1".to_string(),
            name: format!("product {}", id),
            price: 10_000,
            quantity: stock,
            is_active: active,
            image: None,
        }
    }

    fn cart(items: &[(&str, i64)]) -> Cart {
        Cart {
            id: "c-1".to_string(),
            user_id: "u-1".to_string(),
            shop_id: "s-1".to_string(),
            items: items
                .iter()
                .enumerate()
                .map(|(i, (pid, qty))| CartItem {
                    id: format!("ci-{}", i),
                    product_id: pid.to_string(),
                    quantity: *qty,
                    price: 10_000,
                })
                .collect(),
        }
    }

    #[test]
    fn test_stock_within_limits() {
        let products = vec![product("p-1", 5, true), product("p-2", 1, true)];
        assert!(validate_stock(&cart(&[("p-1", 5), ("p-2", 1)]), &products).is_ok());
    }

    #[test]
    fn test_insufficient_stock_names_product() {
        let products = vec![product("p-1", 2, true)];
        match validate_stock(&cart(&[("p-1", 3)]), &products) {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("product p-1")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_split_lines_are_summed() {
        let products = vec![product("p-1", 4, true)];
        assert!(validate_stock(&cart(&[("p-1", 2), ("p-1", 3)]), &products).is_err());
    }

    #[test]
    fn test_missing_and_inactive_products() {
        let products = vec![product("p-1", 10, false)];
        match validate_stock(&cart(&[("p-1", 1), ("p-9", 1)]), &products) {
            Err(AppError::ValidationError(msg)) => {
                assert!(msg.contains("판매 중지"));
                assert!(msg.contains("p-9"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_price_single_applies_voucher_strictly() {
        let cfg = PricingConfig::default();
        let c = cart(&[("p-1", 3)]);

        let promo = Promotion {
            code: "TEN".to_string(),
            discount_type: DiscountType::Percent,
            value: 1_000,
            is_active: true,
            min_order: None,
        };
        let fees = price_single(&c, 1.0, Some(&promo), &cfg).unwrap();
        assert_eq!(fees.subtotal, 30_000);
        assert_eq!(fees.discount, 3_000);

        let picky = Promotion { min_order: Some(1_000_000), ..promo };
        assert!(matches!(price_single(&c, 1.0, Some(&picky), &cfg), Err(AppError::ValidationError(_))));
    }

    fn checkout_request() -> CheckoutRequest {
        CheckoutRequest {
            shop_id: "s-1".to_string(),
            delivery_address_id: "a-1".to_string(),
            delivery_time: None,
            delivery_notes: None,
            voucher_code: None,
        }
    }

    #[actix_web::test]
    async fn test_checkout_creates_order_then_clears_cart() {
        let hasura = FakeHasura::start(checkout_flow);
        let service = CheckoutService::with_client(hasura.client());

        let placed = service.checkout("u-1", checkout_request()).await.unwrap();
        assert_eq!(placed.order_id, "o-1");
        assert_eq!(placed.fees.subtotal, 20_000);
        assert_eq!(
            hasura.operations(),
            vec!["CartForShop", "ShopById", "ProductsByIds", "AddressById", "InsertOrder", "InsertOrderItems", "DeleteCart"]
        );
        assert_eq!(hasura.variables_of("DeleteCart"), vec![json!({ "cart_id": "c-s-1" })]);
    }

    #[actix_web::test]
    async fn test_failed_item_insert_deletes_order_and_keeps_cart() {
        let hasura = FakeHasura::start(|op, vars| match op {
            "InsertOrderItems" => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "constraint violation" })),
            _ => checkout_flow(op, vars),
        });
        let service = CheckoutService::with_client(hasura.client());

        assert!(service.checkout("u-1", checkout_request()).await.is_err());

        let ops = hasura.operations();
        assert_eq!(ops.last().map(String::as_str), Some("DeleteOrder"));
        assert_eq!(hasura.variables_of("DeleteOrder"), vec![json!({ "id": "o-1" })]);
        assert!(!ops.iter().any(|op| op == "DeleteCart"));
    }

    #[actix_web::test]
    async fn test_cart_delete_failure_keeps_order() {
        let hasura = FakeHasura::start(|op, vars| match op {
            "DeleteCart" => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "timeout" })),
            _ => checkout_flow(op, vars),
        });
        let service = CheckoutService::with_client(hasura.client());

        let placed = service.checkout("u-1", checkout_request()).await.unwrap();
        assert_eq!(placed.order_id, "o-1");
        assert!(hasura.variables_of("DeleteOrder").is_empty());
    }

    #[actix_web::test]
    async fn test_stock_shortage_writes_nothing() {
        let hasura = FakeHasura::start(|op, vars| match op {
            "ProductsByIds" => crate::graphql::testing::data(json!({ "Products": [{
                "id": "p-s-1", "shop_id": "s-1", "name": "item", "price": "100", "quantity": 1, "is_active": true
            }] })),
            _ => checkout_flow(op, vars),
        });
        let service = CheckoutService::with_client(hasura.client());

        let err = service.checkout("u-1", checkout_request()).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(hasura.operations(), vec!["CartForShop", "ShopById", "ProductsByIds"]);
    }
}
