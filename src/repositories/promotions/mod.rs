pub mod promotion_repo;

pub use promotion_repo::PromotionRepository;
