use cl_math::Dec;
use soroban_sdk::{contracttype, Env, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub liquidity: u128,
    pub fee_growth_inside_last_0: Dec,
    pub fee_growth_inside_last_1: Dec,
    pub tokens_owed_0: Dec,
    pub tokens_owed_1: Dec,
    pub incentive_growth_inside_last: Vec<Dec>,
    pub incentives_owed: Vec<Dec>,
}

impl Position {
    pub fn new(env: &Env) -> Self {
        Self {
            liquidity: 0,
            fee_growth_inside_last_0: Dec::ZERO,
            fee_growth_inside_last_1: Dec::ZERO,
            tokens_owed_0: Dec::ZERO,
            tokens_owed_1: Dec::ZERO,
            incentive_growth_inside_last: Vec::new(env),
            incentives_owed: Vec::new(env),
        }
    }

    /// No liquidity and nothing left that could pay out a whole unit
    pub fn is_empty(&self) -> bool {
        self.liquidity == 0
            && self.tokens_owed_0 < Dec::ONE
            && self.tokens_owed_1 < Dec::ONE
            && self.incentives_owed.iter().all(|owed| owed < Dec::ONE)
    }
}

/// Position as reported to callers, with uncollected amounts brought up to date
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionInfo {
    pub liquidity: u128,
    pub amount0: i128,
    pub amount1: i128,
    pub fees_owed_0: i128,
    pub fees_owed_1: i128,
    pub incentives_owed: Vec<i128>,
}
