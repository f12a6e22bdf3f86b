//! Derived quantities for inspection and plotting.

pub mod speed;

pub use speed::{speed_profile, SpeedConfig, SpeedSample, TrajectorySide};
