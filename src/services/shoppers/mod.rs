pub mod shopper_service;

pub use shopper_service::*;
