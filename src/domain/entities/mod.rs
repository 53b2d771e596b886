pub mod users;
pub mod shops;
pub mod carts;
pub mod orders;
pub mod promotions;
pub mod reels;
pub mod shoppers;
pub mod referrals;
pub mod business;
pub mod refunds;

pub use users::*;
pub use shops::*;
pub use carts::*;
pub use orders::*;
pub use promotions::*;
pub use reels::*;
pub use shoppers::*;
pub use referrals::*;
pub use business::*;
pub use refunds::*;
