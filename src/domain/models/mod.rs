pub mod auth;
pub mod geo;
pub mod pricing;
pub mod token;

pub use auth::*;
pub use geo::GeoPoint;
pub use pricing::FeeBreakdown;
pub use token::SessionClaims;
