// Growth Accumulators
//
// Outside and inside values live in a modulo-2^256 frame. Only their
// differences are meaningful, and those stay exact across wraps.

use cl_math::{Dec, MathError, Rounding};
use soroban_sdk::{Env, Vec};

use crate::types::{growth_at, Growth, TickInfo};

/// Growth inside [lower, upper] for a single accumulator
pub fn growth_inside(
    global: Dec,
    lower_outside: Dec,
    upper_outside: Dec,
    lower_tick: i32,
    upper_tick: i32,
    current_tick: i32,
) -> Dec {
    let below = if current_tick >= lower_tick {
        lower_outside
    } else {
        global.wrapping_sub(lower_outside)
    };

    let above = if current_tick < upper_tick {
        upper_outside
    } else {
        global.wrapping_sub(upper_outside)
    };

    global.wrapping_sub(below).wrapping_sub(above)
}

/// Growth inside a range for every accumulator of a pool.
/// A missing tick record contributes zero outside growth.
pub fn range_growth_inside(
    env: &Env,
    global: &Growth,
    lower: Option<&TickInfo>,
    upper: Option<&TickInfo>,
    lower_tick: i32,
    upper_tick: i32,
    current_tick: i32,
) -> Growth {
    let outside = |info: Option<&TickInfo>| -> (Dec, Dec) {
        info.map(|i| (i.fee_growth_outside_0, i.fee_growth_outside_1))
            .unwrap_or((Dec::ZERO, Dec::ZERO))
    };
    let (lower_0, lower_1) = outside(lower);
    let (upper_0, upper_1) = outside(upper);

    let mut incentives = Vec::new(env);
    for (index, global_growth) in global.incentives.iter().enumerate() {
        let index = index as u32;
        let lower_outside = lower
            .map(|i| growth_at(&i.incentive_growth_outside, index))
            .unwrap_or(Dec::ZERO);
        let upper_outside = upper
            .map(|i| growth_at(&i.incentive_growth_outside, index))
            .unwrap_or(Dec::ZERO);
        incentives.push_back(growth_inside(
            global_growth,
            lower_outside,
            upper_outside,
            lower_tick,
            upper_tick,
            current_tick,
        ));
    }

    Growth {
        fee_0: growth_inside(global.fee_0, lower_0, upper_0, lower_tick, upper_tick, current_tick),
        fee_1: growth_inside(global.fee_1, lower_1, upper_1, lower_tick, upper_tick, current_tick),
        incentives,
    }
}

/// Add `amount / liquidity` to a global accumulator.
/// Nothing accrues while there is no liquidity to attribute it to.
pub fn accrue(global: Dec, amount: u128, liquidity: u128) -> Result<Dec, MathError> {
    if liquidity == 0 || amount == 0 {
        return Ok(global);
    }
    let increment = Dec::from_ratio(amount, liquidity, Rounding::Down)?;
    global.checked_add(increment)
}

/// `accrue` for fractional amounts such as incentive emissions
pub fn accrue_dec(global: Dec, amount: Dec, liquidity: u128) -> Result<Dec, MathError> {
    if liquidity == 0 || amount.is_zero() {
        return Ok(global);
    }
    global.checked_add(amount.div_int(liquidity, Rounding::Down)?)
}
