//! Travel logs and who may read them.

pub mod service;
pub mod types;
pub mod visibility;

pub use service::TravelLogService;
pub use types::{LogPatch, NewLog, PrivacyLevel, TravelLog};
pub use visibility::{FriendshipOracle, NoFriendships, StaticFriendships, can_view};
