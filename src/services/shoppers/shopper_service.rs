//! # 쇼퍼 서비스
//!
//! 쇼퍼 신청서 접수와 지갑 조회/출금 요청을 처리합니다.
//! 지갑은 신청서 ID(`shoppers.id`)에 연결되어 있으므로 항상 신청서를 먼저 찾습니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::core::errors::AppError;
use crate::domain::dto::{PayoutRequest, ShopperApplicationRequest, WalletResponse};
use crate::domain::entities::{NewShopperApplication, NewWalletTransaction, ShopperApplication, Wallet, WalletTransaction};
use crate::repositories::ShopperRepository;
use crate::services::pricing::FeeService;

pub const APPLICATION_PENDING: &str = "pending";
pub const TRANSACTION_WITHDRAWAL: &str = "withdrawal";
pub const TRANSACTION_PENDING: &str = "pending";
const RECENT_TRANSACTIONS: i64 = 20;

#[service(name = "shopper")]
pub struct ShopperService {
    shopper_repo: Arc<ShopperRepository>,
    fee_service: Arc<FeeService>,
}

impl ShopperService {
    /// `POST /api/shopper/apply` - 사용자당 신청서 하나
    pub async fn apply(&self, user_id: &str, request: ShopperApplicationRequest) -> Result<ShopperApplication, AppError> {
        let transport_mode = request.transport_mode()?;

        if self.shopper_repo.find_application_by_user(user_id).await?.is_some() {
            return Err(AppError::ConflictError("이미 쇼퍼 신청서를 제출했습니다".to_string()));
        }

        let application = NewShopperApplication {
            user_id: user_id.to_string(),
            full_name: request.full_name.trim().to_string(),
            phone: request.phone.trim().to_string(),
            national_id: request.national_id.trim().to_string(),
            transport_mode,
            address: request.address.trim().to_string(),
            status: APPLICATION_PENDING,
        };

        let created = self.shopper_repo.insert_application(&application).await?;
        log::info!("🛵 쇼퍼 신청 접수: user {} ({})", user_id, transport_mode);
        Ok(created)
    }

    /// `GET /api/shopper/application`
    pub async fn application(&self, user_id: &str) -> Result<ShopperApplication, AppError> {
        self.shopper_repo
            .find_application_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("쇼퍼 신청서가 없습니다".to_string()))
    }

    /// `GET /api/shopper/wallet`
    pub async fn wallet(&self, user_id: &str) -> Result<WalletResponse, AppError> {
        let wallet = self.wallet_for(user_id).await?;
        let transactions = self.shopper_repo.recent_transactions(&wallet.id, RECENT_TRANSACTIONS).await?;
        Ok(WalletResponse { wallet, transactions })
    }

    /// `POST /api/shopper/payout` - 가용 잔액에서 예약 잔액으로 옮기고 출금 거래를 남깁니다.
    pub async fn request_payout(&self, user_id: &str, request: &PayoutRequest) -> Result<WalletTransaction, AppError> {
        let wallet = self.wallet_for(user_id).await?;
        let (available, reserved) = wallet.reserve_payout(request.amount, self.fee_service.config().min_payout)?;

        let transaction = NewWalletTransaction {
            wallet_id: wallet.id.clone(),
            amount: request.amount,
            kind: TRANSACTION_WITHDRAWAL,
            status: TRANSACTION_PENDING,
        };

        let recorded = self.shopper_repo.reserve_payout(&wallet, available, reserved, &transaction).await?;
        log::info!("💸 출금 요청: wallet {}, 거래 {}", wallet.id, recorded.id);
        Ok(recorded)
    }

    async fn wallet_for(&self, user_id: &str) -> Result<Wallet, AppError> {
        let application = self.application(user_id).await?;
        self.shopper_repo
            .find_wallet(&application.id)
            .await?
            .ok_or_else(|| AppError::NotFound("지갑이 아직 생성되지 않았습니다".to_string()))
    }
}
