pub mod business_repo;

pub use business_repo::BusinessRepository;
