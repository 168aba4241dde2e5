// SPDX-License-Identifier: MIT
// Single Swap Step

use primitive_types::U256;

use crate::dec::{Dec, Rounding};
use crate::error::MathError;
use crate::full_math::{mul_div_u128, narrow_u128, widen};
use crate::liquidity::{amount0_delta, amount0_delta_wide, amount1_delta, amount1_delta_wide};
use crate::sqrt_price::{next_sqrt_price_from_input, next_sqrt_price_from_output};

/// Result of moving the price toward one target within constant liquidity
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SwapStep {
    pub sqrt_price_next: Dec,
    /// Input consumed, excluding the fee
    pub amount_in: u128,
    pub amount_out: u128,
    pub fee_amount: u128,
}

/// Advance the price from `current` toward `target`.
///
/// `amount_remaining` is input still to spend when `exact_in`, otherwise
/// output still to receive. Direction follows from the two prices.
pub fn compute_swap_step(
    sqrt_price_current: Dec,
    sqrt_price_target: Dec,
    liquidity: u128,
    amount_remaining: u128,
    spread_factor: Dec,
    exact_in: bool,
) -> Result<SwapStep, MathError> {
    if spread_factor >= Dec::ONE {
        return Err(MathError::InvalidSpreadFactor);
    }

    if liquidity == 0 {
        return Ok(SwapStep {
            sqrt_price_next: sqrt_price_target,
            amount_in: 0,
            amount_out: 0,
            fee_amount: 0,
        });
    }

    let zero_for_one = sqrt_price_current >= sqrt_price_target;
    let fee_complement = Dec::ONE.checked_sub(spread_factor)?;

    // Full amount needed to reach the target, which may exceed u128
    let (sqrt_price_next, to_target) = if exact_in {
        let remaining_less_fee = mul_div_u128(
            amount_remaining,
            fee_complement.raw(),
            Dec::ONE.raw(),
            Rounding::Down,
        )?;
        let to_target = if zero_for_one {
            amount0_delta_wide(sqrt_price_target, sqrt_price_current, liquidity, Rounding::Up)?
        } else {
            amount1_delta_wide(sqrt_price_current, sqrt_price_target, liquidity, Rounding::Up)?
        };
        let next = if U256::from(remaining_less_fee) >= to_target {
            sqrt_price_target
        } else {
            next_sqrt_price_from_input(sqrt_price_current, liquidity, remaining_less_fee, zero_for_one)?
        };
        (next, to_target)
    } else {
        let to_target = if zero_for_one {
            amount1_delta_wide(sqrt_price_target, sqrt_price_current, liquidity, Rounding::Down)?
        } else {
            amount0_delta_wide(sqrt_price_current, sqrt_price_target, liquidity, Rounding::Down)?
        };
        let next = if U256::from(amount_remaining) >= to_target {
            sqrt_price_target
        } else {
            next_sqrt_price_from_output(sqrt_price_current, liquidity, amount_remaining, zero_for_one)?
        };
        (next, to_target)
    };

    let reached = sqrt_price_next == sqrt_price_target;

    let (amount_in, mut amount_out) = if zero_for_one {
        let amount_in = if reached && exact_in {
            narrow_u128(widen(to_target))?
        } else {
            amount0_delta(sqrt_price_next, sqrt_price_current, liquidity, Rounding::Up)?
        };
        let amount_out = if reached && !exact_in {
            narrow_u128(widen(to_target))?
        } else {
            amount1_delta(sqrt_price_next, sqrt_price_current, liquidity, Rounding::Down)?
        };
        (amount_in, amount_out)
    } else {
        let amount_in = if reached && exact_in {
            narrow_u128(widen(to_target))?
        } else {
            amount1_delta(sqrt_price_current, sqrt_price_next, liquidity, Rounding::Up)?
        };
        let amount_out = if reached && !exact_in {
            narrow_u128(widen(to_target))?
        } else {
            amount0_delta(sqrt_price_current, sqrt_price_next, liquidity, Rounding::Down)?
        };
        (amount_in, amount_out)
    };

    if !exact_in && amount_out > amount_remaining {
        amount_out = amount_remaining;
    }

    let fee_amount = if exact_in && !reached {
        // The price stopped short: everything left over is fee
        amount_remaining.saturating_sub(amount_in)
    } else {
        mul_div_u128(amount_in, spread_factor.raw(), fee_complement.raw(), Rounding::Up)?
    };

    Ok(SwapStep {
        sqrt_price_next,
        amount_in,
        amount_out,
        fee_amount,
    })
}
