pub mod refund_repo;

pub use refund_repo::RefundRepository;
