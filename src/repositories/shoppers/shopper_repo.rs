//! # 쇼퍼 리포지토리
//!
//! `shoppers`(신청서), `Wallets`, `Wallet_Transactions` 테이블을 다룹니다.
//!
//! 지갑 잔액 변경은 읽은 시점의 `available_balance`를 조건으로 거는 조건부 업데이트입니다.
//! 그 사이 잔액이 바뀌었으면 `ConflictError`가 반환됩니다.

use std::sync::Arc;
use serde::Deserialize;
use serde_json::json;
use crate::core::errors::AppError;
use crate::domain::entities::{
    NewShopperApplication, NewWalletTransaction, ShopperApplication, Wallet, WalletTransaction,
};
use crate::graphql::{HasuraClient, MutationResult};
use crate::utils::money::format_minor_units;

const APPLICATION_FIELDS: &str = "id user_id full_name phone national_id transport_mode address status created_at";
const WALLET_FIELDS: &str = "id shopper_id available_balance reserved_balance";
const TRANSACTION_FIELDS: &str = "id wallet_id amount type status created_at";

pub struct ShopperRepository {
    client: Arc<HasuraClient>,
}

impl ShopperRepository {
    pub fn new(client: Arc<HasuraClient>) -> Self {
        Self { client }
    }

    pub async fn find_application_by_user(&self, user_id: &str) -> Result<Option<ShopperApplication>, AppError> {
        #[derive(Deserialize)]
        struct ShoppersData {
            shoppers: Vec<ShopperApplication>,
        }

        let query = format!(
            "query ShopperByUser($user_id: uuid!) {{ shoppers(where: {{user_id: {{_eq: $user_id}}}}, limit: 1) {{ {} }} }}",
            APPLICATION_FIELDS
        );
        let data: ShoppersData = self.client.request(&query, json!({ "user_id": user_id })).await?;
        Ok(data.shoppers.into_iter().next())
    }

    pub async fn insert_application(&self, application: &NewShopperApplication) -> Result<ShopperApplication, AppError> {
        #[derive(Deserialize)]
        struct Inserted {
            #[serde(rename = "insert_shoppers_one")]
            application: Option<ShopperApplication>,
        }

        let query = format!(
            "mutation InsertShopper($object: shoppers_insert_input!) {{ insert_shoppers_one(object: $object) {{ {} }} }}",
            APPLICATION_FIELDS
        );
        let data: Inserted = self.client.request(&query, json!({ "object": application })).await?;

        data.application
            .ok_or_else(|| AppError::ExternalServiceError("insert_shoppers_one 결과가 비어 있습니다".to_string()))
    }

    pub async fn find_wallet(&self, shopper_id: &str) -> Result<Option<Wallet>, AppError> {
        #[derive(Deserialize)]
        struct WalletsData {
            #[serde(rename = "Wallets")]
            wallets: Vec<Wallet>,
        }

        let query = format!(
            "query WalletByShopper($shopper_id: uuid!) {{ Wallets(where: {{shopper_id: {{_eq: $shopper_id}}}}, limit: 1) {{ {} }} }}",
            WALLET_FIELDS
        );
        let data: WalletsData = self.client.request(&query, json!({ "shopper_id": shopper_id })).await?;
        Ok(data.wallets.into_iter().next())
    }

    /// 최신순 거래 내역
    pub async fn recent_transactions(&self, wallet_id: &str, limit: i64) -> Result<Vec<WalletTransaction>, AppError> {
        #[derive(Deserialize)]
        struct TransactionsData {
            #[serde(rename = "Wallet_Transactions")]
            transactions: Vec<WalletTransaction>,
        }

        let query = format!(
            "query RecentTransactions($wallet_id: uuid!, $limit: Int!) {{ \
             Wallet_Transactions(where: {{wallet_id: {{_eq: $wallet_id}}}}, order_by: {{created_at: desc}}, limit: $limit) {{ {} }} }}",
            TRANSACTION_FIELDS
        );
        let data: TransactionsData = self.client
            .request(&query, json!({ "wallet_id": wallet_id, "limit": limit }))
            .await?;
        Ok(data.transactions)
    }

    /// 잔액 이동과 출금 거래 기록을 한 뮤테이션으로 실행합니다.
    ///
    /// `expected_available`이 현재 값과 다르면 아무것도 바뀌지 않고 409를 반환합니다.
    pub async fn reserve_payout(
        &self,
        wallet: &Wallet,
        new_available: i64,
        new_reserved: i64,
        transaction: &NewWalletTransaction,
    ) -> Result<WalletTransaction, AppError> {
        #[derive(Deserialize)]
        struct Updated {
            #[serde(rename = "update_Wallets")]
            result: MutationResult,
        }

        let data: Updated = self.client
            .request(
                "mutation ReserveBalance($id: uuid!, $expected: numeric!, $available: numeric!, $reserved: numeric!) { \
                 update_Wallets(where: {id: {_eq: $id}, available_balance: {_eq: $expected}}, \
                 _set: {available_balance: $available, reserved_balance: $reserved}) { affected_rows } }",
                json!({
                    "id": wallet.id,
                    "expected": format_minor_units(wallet.available_balance),
                    "available": format_minor_units(new_available),
                    "reserved": format_minor_units(new_reserved),
                }),
            )
            .await?;

        if data.result.affected_rows == 0 {
            return Err(AppError::ConflictError("지갑 잔액이 변경되었습니다. 다시 시도해주세요".to_string()));
        }

        #[derive(Deserialize)]
        struct Inserted {
            #[serde(rename = "insert_Wallet_Transactions_one")]
            transaction: Option<WalletTransaction>,
        }

        let query = format!(
            "mutation InsertTransaction($object: Wallet_Transactions_insert_input!) {{ \
             insert_Wallet_Transactions_one(object: $object) {{ {} }} }}",
            TRANSACTION_FIELDS
        );
        let inserted: Result<Inserted, AppError> = self.client.request(&query, json!({ "object": transaction })).await;

        match inserted.and_then(|data| {
            data.transaction.ok_or_else(|| {
                AppError::ExternalServiceError("insert_Wallet_Transactions_one 결과가 비어 있습니다".to_string())
            })
        }) {
            Ok(transaction) => Ok(transaction),
            Err(e) => {
                // 거래 기록 실패 시 잔액을 되돌립니다.
                if let Err(rollback) = self.restore_balances(wallet).await {
                    log::error!("지갑 잔액 복구 실패 (wallet {}): {}", wallet.id, rollback);
                }
                Err(e)
            }
        }
    }

    async fn restore_balances(&self, wallet: &Wallet) -> Result<(), AppError> {
        #[derive(Deserialize)]
        struct Updated {
            #[serde(rename = "update_Wallets_by_pk")]
            _wallet: Option<serde_json::Value>,
        }

        let _: Updated = self.client
            .request(
                "mutation RestoreBalance($id: uuid!, $available: numeric!, $reserved: numeric!) { \
                 update_Wallets_by_pk(pk_columns: {id: $id}, _set: {available_balance: $available, reserved_balance: $reserved}) { id } }",
                json!({
                    "id": wallet.id,
                    "available": format_minor_units(wallet.available_balance),
                    "reserved": format_minor_units(wallet.reserved_balance),
                }),
            )
            .await?;
        Ok(())
    }
}

crate::impl_repository!(ShopperRepository, "shopper", "shoppers");
