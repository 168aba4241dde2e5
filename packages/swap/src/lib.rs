#![no_std]

pub mod engine;
pub mod error;
pub mod types;

pub use engine::{commit_tick_writes, OverlayTicks, SwapExecutor};
pub use error::SwapError;
pub use types::{SwapKind, SwapOutcome, SwapState, SwapStatus};
