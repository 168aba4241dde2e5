// Concentrated-Liquidity Tick Package

#![no_std]

pub mod accumulator;
pub mod bitmap;
pub mod error;
pub mod store;
pub mod types;
pub mod update;

pub use accumulator::{accrue, accrue_dec, growth_inside, range_growth_inside};
pub use bitmap::{flip_tick, is_initialized, next_initialized_tick, BitmapStore, MemoryBitmap};
pub use error::TickError;
pub use store::{MemoryTicks, TickStore};
pub use types::{growth_at, Growth, TickInfo};
pub use update::{clear_tick, cross_tick, update_tick};

// Re-export from math
pub use cl_math::{is_aligned, is_valid_tick};
