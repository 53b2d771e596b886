pub mod checkout_service;
pub mod combined_order_service;

pub use checkout_service::*;
pub use combined_order_service::*;
