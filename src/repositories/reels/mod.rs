pub mod reel_repo;

pub use reel_repo::ReelRepository;
