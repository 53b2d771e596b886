//! # 주문 리포지토리
//!
//! `Orders` / `Order_Items` 테이블을 다룹니다.
//!
//! 상태 변경은 항상 "현재 상태가 X일 때만" 조건부 업데이트로 실행합니다.
//! 조건이 맞지 않아 `affected_rows`가 0이면 다른 요청이 먼저 상태를 바꾼 것이므로
//! `ConflictError`를 반환합니다.

use std::sync::Arc;
use serde::Deserialize;
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::entities::{NewOrder, NewOrderItem, Order, OrderStatus};
use crate::graphql::{HasuraClient, MutationResult};

const ORDER_FIELDS: &str = "id user_id shop_id combined_order_id pin status total service_fee delivery_fee \
     discount voucher_code delivery_address_id delivery_time delivery_notes shopper_id created_at";

pub struct OrderRepository {
    client: Arc<HasuraClient>,
}

#[derive(Deserialize)]
struct OrdersData {
    #[serde(rename = "Orders")]
    orders: Vec<Order>,
}

#[derive(Deserialize)]
struct IdOnly {
    id: String,
}

impl OrderRepository {
    pub fn new(client: Arc<HasuraClient>) -> Self {
        Self { client }
    }

    /// 주문 한 건을 저장하고 새 주문 ID를 반환합니다.
    pub async fn insert(&self, order: &NewOrder) -> Result<String, AppError> {
        #[derive(Deserialize)]
        struct Inserted {
            #[serde(rename = "insert_Orders_one")]
            order: Option<IdOnly>,
        }

        let data: Inserted = self.client
            .request(
                "mutation InsertOrder($object: Orders_insert_input!) { insert_Orders_one(object: $object) { id } }",
                json!({ "object": order }),
            )
            .await?;

        data.order
            .map(|o| o.id)
            .ok_or_else(|| AppError::ExternalServiceError("insert_Orders_one 결과가 비어 있습니다".to_string()))
    }

    pub async fn insert_items(&self, items: &[NewOrderItem]) -> Result<i64, AppError> {
        #[derive(Deserialize)]
        struct Inserted {
            #[serde(rename = "insert_Order_Items")]
            result: MutationResult,
        }

        let data: Inserted = self.client
            .request(
                "mutation InsertOrderItems($objects: [Order_Items_insert_input!]!) { \
                 insert_Order_Items(objects: $objects) { affected_rows } }",
                json!({ "objects": items }),
            )
            .await?;

        Ok(data.result.affected_rows)
    }

    /// 보상 삭제: 주문 항목과 주문을 함께 지웁니다.
    pub async fn delete(&self, order_id: &str) -> Result<(), AppError> {
        #[derive(Deserialize)]
        struct Deleted {
            #[serde(rename = "delete_Order_Items")]
            _items: MutationResult,
            #[serde(rename = "delete_Orders_by_pk")]
            _order: Option<IdOnly>,
        }

        let _: Deleted = self.client
            .request(
                "mutation DeleteOrder($id: uuid!) { \
                 delete_Order_Items(where: {order_id: {_eq: $id}}) { affected_rows } \
                 delete_Orders_by_pk(id: $id) { id } }",
                json!({ "id": order_id }),
            )
            .await?;
        Ok(())
    }

    pub async fn find_by_id(&self, order_id: &str) -> Result<Option<Order>, AppError> {
        #[derive(Deserialize)]
        struct OrderByPk {
            #[serde(rename = "Orders_by_pk")]
            order: Option<Order>,
        }

        let query = format!(
            "query OrderById($id: uuid!) {{ Orders_by_pk(id: $id) {{ {} Order_Items {{ order_id product_id quantity price }} }} }}",
            ORDER_FIELDS
        );

        let data: OrderByPk = self.client.request(&query, json!({ "id": order_id })).await?;
        Ok(data.order)
    }

    /// 사용자 주문 목록 (최신순)
    pub async fn list_by_user(
        &self,
        user_id: &str,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, AppError> {
        let mut filter = json!({ "user_id": { "_eq": user_id } });
        if let Some(status) = status {
            filter["status"] = json!({ "_eq": status });
        }

        let query = format!(
            "query UserOrders($where: Orders_bool_exp!, $limit: Int!, $offset: Int!) {{ \
             Orders(where: $where, order_by: {{created_at: desc}}, limit: $limit, offset: $offset) {{ {} }} }}",
            ORDER_FIELDS
        );

        let data: OrdersData = self.client
            .request(&query, json!({ "where": filter, "limit": limit, "offset": offset }))
            .await?;
        Ok(data.orders)
    }

    /// `from` 상태일 때만 `to`로 바꿉니다.
    pub async fn transition(&self, order_id: &str, from: OrderStatus, to: OrderStatus) -> Result<(), AppError> {
        #[derive(Deserialize)]
        struct Updated {
            #[serde(rename = "update_Orders")]
            result: MutationResult,
        }

        let data: Updated = self.client
            .request(
                "mutation TransitionOrder($id: uuid!, $from: String!, $to: String!) { \
                 update_Orders(where: {id: {_eq: $id}, status: {_eq: $from}}, _set: {status: $to}) { affected_rows } }",
                json!({ "id": order_id, "from": from, "to": to }),
            )
            .await?;

        if data.result.affected_rows == 0 {
            return Err(AppError::ConflictError(format!(
                "주문 상태가 이미 변경되었습니다 (기대 상태: {})",
                from
            )));
        }
        Ok(())
    }

    /// 배정되지 않은 `PENDING` 주문을 쇼퍼에게 배정하고 `accepted`로 바꿉니다.
    pub async fn assign_shopper(&self, order_id: &str, shopper_id: &str) -> Result<(), AppError> {
        #[derive(Deserialize)]
        struct Updated {
            #[serde(rename = "update_Orders")]
            result: MutationResult,
        }

        let data: Updated = self.client
            .request(
                "mutation AssignShopper($id: uuid!, $shopper_id: uuid!, $from: String!, $to: String!) { \
                 update_Orders(where: {id: {_eq: $id}, status: {_eq: $from}, shopper_id: {_is_null: true}}, \
                 _set: {shopper_id: $shopper_id, status: $to}) { affected_rows } }",
                json!({
                    "id": order_id,
                    "shopper_id": shopper_id,
                    "from": OrderStatus::Pending,
                    "to": OrderStatus::Accepted,
                }),
            )
            .await?;

        if data.result.affected_rows == 0 {
            return Err(AppError::ConflictError("이미 다른 쇼퍼가 수락한 주문입니다".to_string()));
        }
        Ok(())
    }
}

crate::impl_repository!(OrderRepository, "order", "Orders");
