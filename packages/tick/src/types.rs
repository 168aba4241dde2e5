// Tick Types

use cl_math::Dec;
use soroban_sdk::{contracttype, Env, Vec};

/// Information stored for each initialized tick
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickInfo {
    /// Total liquidity referencing this tick
    pub liquidity_gross: u128,
    /// Net liquidity change when crossing left-to-right
    pub liquidity_net: i128,
    /// Fee growth outside this tick for token0
    pub fee_growth_outside_0: Dec,
    /// Fee growth outside this tick for token1
    pub fee_growth_outside_1: Dec,
    /// Incentive growth outside this tick, one entry per track
    pub incentive_growth_outside: Vec<Dec>,
}

impl TickInfo {
    pub fn new(env: &Env) -> Self {
        Self {
            liquidity_gross: 0,
            liquidity_net: 0,
            fee_growth_outside_0: Dec::ZERO,
            fee_growth_outside_1: Dec::ZERO,
            incentive_growth_outside: Vec::new(env),
        }
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.liquidity_gross > 0
    }
}

/// Accumulator values at one point in time: either the pool's global
/// growth or the growth inside a position's range.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Growth {
    pub fee_0: Dec,
    pub fee_1: Dec,
    pub incentives: Vec<Dec>,
}

impl Growth {
    pub fn zero(env: &Env) -> Self {
        Self {
            fee_0: Dec::ZERO,
            fee_1: Dec::ZERO,
            incentives: Vec::new(env),
        }
    }
}

/// Entry `index` of an incentive vector; entries created after the
/// vector was last written read as zero.
#[inline]
pub fn growth_at(values: &Vec<Dec>, index: u32) -> Dec {
    values.get(index).unwrap_or(Dec::ZERO)
}
