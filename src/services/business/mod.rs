pub mod rfq_service;

pub use rfq_service::*;
