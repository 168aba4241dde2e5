#![no_std]

pub mod error;
pub mod fees;
pub mod manager;
pub mod types;

pub use error::PositionError;
pub use fees::{collect_fees, collect_incentives};
pub use manager::{modify_position, sync_position, validate_position_params};
pub use types::{Position, PositionInfo};
