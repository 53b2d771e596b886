pub mod shopper_repo;

pub use shopper_repo::ShopperRepository;
