//! 테스트용 로컬 Hasura 엔드포인트
//!
//! 임의 포트에 actix 서버를 띄우고 받은 GraphQL 요청(operation 이름, 쿼리, 변수)을
//! 기록합니다. 응답은 테스트가 넘긴 스크립트가 operation 이름과 변수로 결정합니다.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};
use super::HasuraClient;

type Script = dyn Fn(&str, &Value) -> (StatusCode, Value) + Send + Sync;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub operation: String,
    pub query: String,
    pub variables: Value,
}

pub struct FakeHasura {
    endpoint: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeHasura {
    /// `#[actix_web::test]` 안에서 호출해야 합니다.
    pub fn start<F>(script: F) -> Self
    where
        F: Fn(&str, &Value) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        let script: Arc<Script> = Arc::new(script);
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));
        let recorder = requests.clone();

        let server = HttpServer::new(move || {
            let script = script.clone();
            let recorder = recorder.clone();
            App::new().default_service(web::to(move |body: web::Json<Value>| {
                let script = script.clone();
                let recorder = recorder.clone();
                async move {
                    let query = body["query"].as_str().unwrap_or_default().to_string();
                    let variables = body["variables"].clone();
                    let operation = operation_name(&query);

                    let (status, response) = script(&operation, &variables);
                    recorder.lock().unwrap().push(RecordedRequest { operation, query, variables });
                    HttpResponse::build(status).json(response)
                }
            }))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind fake hasura");

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        Self {
            endpoint: format!("http://{}/v1/graphql", addr),
            requests,
        }
    }

    pub fn client(&self) -> Arc<HasuraClient> {
        Arc::new(
            HasuraClient::with_endpoint(self.endpoint.clone(), None, Duration::from_secs(5))
                .expect("fake hasura client"),
        )
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// 받은 순서대로의 operation 이름
    pub fn operations(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.operation).collect()
    }

    pub fn variables_of(&self, operation: &str) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r.operation == operation)
            .map(|r| r.variables)
            .collect()
    }
}

/// `(200, {"data": ...})`
pub fn data(payload: Value) -> (StatusCode, Value) {
    (StatusCode::OK, json!({ "data": payload }))
}

/// 체크아웃 경로의 정상 응답. 매장 `s-N`의 장바구니는 `c-s-N`, 주문은 `o-N`이 됩니다.
/// 모르는 operation은 GraphQL 오류로 답합니다.
pub fn checkout_flow(operation: &str, variables: &Value) -> (StatusCode, Value) {
    let text = |key: &str| variables[key].as_str().unwrap_or_default().to_string();

    match operation {
        "CartForShop" => {
            let shop_id = text("shop_id");
            data(json!({ "Carts": [{
                "id": format!("c-{}", shop_id),
                "user_id": text("user_id"),
                "shop_id": shop_id,
                "Cart_Items": [{ "id": "ci-1", "product_id": format!("p-{}", shop_id), "quantity": 2, "price": "100" }]
            }] }))
        }
        "ShopById" => data(json!({ "Shops_by_pk": {
            "id": text("id"),
            "name": "Corner Market",
            "latitude": "37.5000",
            "longitude": "127.0000",
            "is_active": true
        } })),
        "ProductsByIds" => {
            let products: Vec<Value> = variables["ids"]
                .as_array()
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .map(|id| json!({ "id": id, "shop_id": "s", "name": "item", "price": "100", "quantity": 10, "is_active": true }))
                .collect();
            data(json!({ "Products": products }))
        }
        "AddressById" => data(json!({ "Addresses": [{
            "id": text("id"),
            "user_id": text("user_id"),
            "latitude": 37.51,
            "longitude": 127.01
        }] })),
        "InsertOrder" => {
            let shop_id = variables["object"]["shop_id"].as_str().unwrap_or_default();
            data(json!({ "insert_Orders_one": { "id": format!("o-{}", shop_id.trim_start_matches("s-")) } }))
        }
        "InsertOrderItems" => {
            let count = variables["objects"].as_array().map(Vec::len).unwrap_or(0);
            data(json!({ "insert_Order_Items": { "affected_rows": count } }))
        }
        "DeleteOrder" => data(json!({
            "delete_Order_Items": { "affected_rows": 1 },
            "delete_Orders_by_pk": { "id": text("id") }
        })),
        "DeleteCart" => data(json!({
            "delete_Cart_Items": { "affected_rows": 1 },
            "delete_Carts_by_pk": { "id": text("cart_id") }
        })),
        other => (StatusCode::OK, json!({ "errors": [{ "message": format!("unexpected operation {}", other) }] })),
    }
}

/// `query Name(...) { ... }` → `Name`. 이름 없는 쿼리는 빈 문자열.
pub fn operation_name(query: &str) -> String {
    let rest = query
        .trim_start()
        .trim_start_matches("query")
        .trim_start_matches("mutation")
        .trim_start();
    rest.chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_name() {
        assert_eq!(operation_name("query ShopById($id: uuid!) { x }"), "ShopById");
        assert_eq!(operation_name("mutation DeleteCart($cart_id: uuid!) { x }"), "DeleteCart");
        assert_eq!(operation_name("query { __typename }"), "");
    }
}
