// Pool Types

use cl_math::{
    Dec, Rounding, DEFAULT_MAX_INCENTIVE_TRACKS, DEFAULT_SPREAD_FACTORS_BPS, DEFAULT_TICK_SPACINGS,
};
use cl_tick::Growth;
use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::error::PoolError;

// Re-export types from packages
pub use cl_position::{Position, PositionInfo};
pub use cl_tick::TickInfo;

// ============================================================
// MODULE PARAMETERS
// ============================================================

/// Admin-controlled settings shared by every pool
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Params {
    pub authorized_tick_spacings: Vec<u32>,
    pub authorized_spread_factors: Vec<Dec>,
    /// Upper bound on incentive tracks per pool
    pub max_incentive_tracks: u32,
}

impl Params {
    pub fn default_for(env: &Env) -> Self {
        let mut authorized_tick_spacings = Vec::new(env);
        for spacing in DEFAULT_TICK_SPACINGS {
            authorized_tick_spacings.push_back(spacing);
        }

        let mut authorized_spread_factors = Vec::new(env);
        for bps in DEFAULT_SPREAD_FACTORS_BPS {
            authorized_spread_factors.push_back(bps_to_dec(bps));
        }

        Self {
            authorized_tick_spacings,
            authorized_spread_factors,
            max_incentive_tracks: DEFAULT_MAX_INCENTIVE_TRACKS,
        }
    }

    pub fn validate(&self) -> Result<(), PoolError> {
        if self.authorized_tick_spacings.is_empty() || self.authorized_spread_factors.is_empty() {
            return Err(PoolError::InvalidParams);
        }
        if self.authorized_tick_spacings.iter().any(|spacing| spacing == 0) {
            return Err(PoolError::InvalidParams);
        }
        if self.authorized_spread_factors.iter().any(|factor| factor >= Dec::ONE) {
            return Err(PoolError::InvalidParams);
        }
        Ok(())
    }

    pub fn allows_tick_spacing(&self, spacing: u32) -> bool {
        self.authorized_tick_spacings.contains(spacing)
    }

    pub fn allows_spread_factor(&self, factor: Dec) -> bool {
        self.authorized_spread_factors.contains(factor)
    }
}

/// Basis points as an exact decimal (30 -> 0.003)
pub fn bps_to_dec(bps: u32) -> Dec {
    // 10^32 per basis point keeps the value exact
    Dec::from_ratio(bps as u128, 10_000, Rounding::Down).unwrap_or(Dec::ZERO)
}

// ============================================================
// POOL STATE
// ============================================================

/// Reward stream paid to in-range liquidity over time
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IncentiveTrack {
    pub reward_token: Address,
    /// Tokens emitted per second
    pub emission_rate: Dec,
    /// Funded amount not yet emitted
    pub remaining: Dec,
    pub growth_global: Dec,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub id: u64,
    /// Sorted: token0 < token1
    pub token0: Address,
    pub token1: Address,
    pub tick_spacing: u32,
    pub spread_factor: Dec,
    pub sqrt_price: Dec,
    pub current_tick: i32,
    /// Active liquidity in range
    pub liquidity: u128,
    pub fee_growth_global_0: Dec,
    pub fee_growth_global_1: Dec,
    pub incentives: Vec<IncentiveTrack>,
    /// Ledger timestamp incentives were last accrued to
    pub last_accrual_time: u64,
}

impl PoolState {
    /// Global growth of every accumulator, in track order
    pub fn global_growth(&self, env: &Env) -> Growth {
        let mut incentives = Vec::new(env);
        for track in self.incentives.iter() {
            incentives.push_back(track.growth_global);
        }
        Growth {
            fee_0: self.fee_growth_global_0,
            fee_1: self.fee_growth_global_1,
            incentives,
        }
    }

    /// Swap direction for an input token
    pub fn zero_for_one(&self, token_in: &Address) -> Result<bool, PoolError> {
        if *token_in == self.token0 {
            Ok(true)
        } else if *token_in == self.token1 {
            Ok(false)
        } else {
            Err(PoolError::InvalidToken)
        }
    }
}

// ============================================================
// RESULTS
// ============================================================

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapResult {
    /// Input charged, fee included
    pub amount_in: i128,
    pub amount_out: i128,
    pub fee_amount: i128,
    pub sqrt_price: Dec,
    pub current_tick: i32,
    pub liquidity: u128,
    pub ticks_crossed: u32,
}

/// Liquidity added and the amounts it costs
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddLiquidityResult {
    pub liquidity: u128,
    pub amount0: i128,
    pub amount1: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickEntry {
    pub tick: i32,
    pub info: TickInfo,
}
