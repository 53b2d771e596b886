pub mod reel_service;

pub use reel_service::ReelService;
