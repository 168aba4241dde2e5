use cl_math::Dec;
use cl_tick::{Growth, TickInfo};
use soroban_sdk::{contracttype, Map};

use crate::error::SwapError;

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SwapKind {
    /// Spend exactly the given input
    ExactIn,
    /// Receive exactly the given output
    ExactOut,
}

/// Working copy of the pool fields a swap reads and writes
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapState {
    pub sqrt_price: Dec,
    pub current_tick: i32,
    pub liquidity: u128,
    pub tick_spacing: u32,
    pub spread_factor: Dec,
    pub global: Growth,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SwapStatus {
    Active,
    Completed,
    Failed(SwapError),
}

/// Everything a completed swap produced; nothing is persisted yet
#[derive(Clone, Debug)]
pub struct SwapOutcome {
    /// Input charged, fee included
    pub amount_in: u128,
    pub amount_out: u128,
    pub fee_amount: u128,
    pub ticks_crossed: u32,
    pub state: SwapState,
    /// Tick records changed by crossings, `None` for removals
    pub tick_writes: Map<i32, Option<TickInfo>>,
}
