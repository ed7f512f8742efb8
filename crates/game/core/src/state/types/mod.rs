pub mod common;

pub use common::{LevelId, Points, RewardId};
