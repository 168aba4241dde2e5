// SPDX-License-Identifier: MIT
// Liquidity Calculations

use primitive_types::{U256, U512};

use crate::constants::DEC_ONE;
use crate::dec::{Dec, Rounding};
use crate::error::MathError;
use crate::full_math::{div_rounding, mul_div, narrow, narrow_u128, widen};

#[inline]
fn ordered(a: Dec, b: Dec) -> (U512, U512) {
    if a <= b {
        (widen(a.raw()), widen(b.raw()))
    } else {
        (widen(b.raw()), widen(a.raw()))
    }
}

/// token0 between two prices, unbounded: L*(b-a)*S / (a*b)
pub fn amount0_delta_wide(
    sqrt_price_a: Dec,
    sqrt_price_b: Dec,
    liquidity: u128,
    rounding: Rounding,
) -> Result<U256, MathError> {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    if lower.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let numerator = U512::from(liquidity) * (upper - lower);
    narrow(mul_div(numerator, U512::from(DEC_ONE), lower * upper, rounding)?)
}

/// token1 between two prices, unbounded: L*(b-a) / S
pub fn amount1_delta_wide(
    sqrt_price_a: Dec,
    sqrt_price_b: Dec,
    liquidity: u128,
    rounding: Rounding,
) -> Result<U256, MathError> {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    narrow(mul_div(
        U512::from(liquidity),
        upper - lower,
        U512::from(DEC_ONE),
        rounding,
    )?)
}

/// Calculate token0 amount for a liquidity and price range
pub fn amount0_delta(
    sqrt_price_a: Dec,
    sqrt_price_b: Dec,
    liquidity: u128,
    rounding: Rounding,
) -> Result<u128, MathError> {
    narrow_u128(widen(amount0_delta_wide(sqrt_price_a, sqrt_price_b, liquidity, rounding)?))
}

/// Calculate token1 amount for a liquidity and price range
pub fn amount1_delta(
    sqrt_price_a: Dec,
    sqrt_price_b: Dec,
    liquidity: u128,
    rounding: Rounding,
) -> Result<u128, MathError> {
    narrow_u128(widen(amount1_delta_wide(sqrt_price_a, sqrt_price_b, liquidity, rounding)?))
}

/// Liquidity supported by `amount0` over a range: amount*a*b / ((b-a)*S)
pub fn liquidity_for_amount0(
    sqrt_price_a: Dec,
    sqrt_price_b: Dec,
    amount0: u128,
) -> Result<u128, MathError> {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    let denominator = (upper - lower) * U512::from(DEC_ONE);
    let numerator = (U512::from(amount0) * lower)
        .checked_mul(upper)
        .ok_or(MathError::Overflow)?;
    narrow_u128(div_rounding(numerator, denominator, Rounding::Down)?)
}

/// Liquidity supported by `amount1` over a range: amount*S / (b-a)
pub fn liquidity_for_amount1(
    sqrt_price_a: Dec,
    sqrt_price_b: Dec,
    amount1: u128,
) -> Result<u128, MathError> {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    narrow_u128(mul_div(
        U512::from(amount1),
        U512::from(DEC_ONE),
        upper - lower,
        Rounding::Down,
    )?)
}

/// Largest liquidity both amounts can fund at the current price
pub fn liquidity_for_amounts(
    sqrt_price: Dec,
    sqrt_price_lower: Dec,
    sqrt_price_upper: Dec,
    amount0: u128,
    amount1: u128,
) -> Result<u128, MathError> {
    if sqrt_price_lower >= sqrt_price_upper {
        return Err(MathError::SqrtPriceOutOfRange);
    }

    if sqrt_price <= sqrt_price_lower {
        liquidity_for_amount0(sqrt_price_lower, sqrt_price_upper, amount0)
    } else if sqrt_price >= sqrt_price_upper {
        liquidity_for_amount1(sqrt_price_lower, sqrt_price_upper, amount1)
    } else {
        let liquidity0 = liquidity_for_amount0(sqrt_price, sqrt_price_upper, amount0)?;
        let liquidity1 = liquidity_for_amount1(sqrt_price_lower, sqrt_price, amount1)?;
        Ok(liquidity0.min(liquidity1))
    }
}

/// Token amounts represented by `liquidity` over a range at the current price
pub fn amounts_for_liquidity(
    sqrt_price: Dec,
    sqrt_price_lower: Dec,
    sqrt_price_upper: Dec,
    liquidity: u128,
    rounding: Rounding,
) -> Result<(u128, u128), MathError> {
    if sqrt_price_lower >= sqrt_price_upper {
        return Err(MathError::SqrtPriceOutOfRange);
    }

    if sqrt_price <= sqrt_price_lower {
        let amount0 = amount0_delta(sqrt_price_lower, sqrt_price_upper, liquidity, rounding)?;
        Ok((amount0, 0))
    } else if sqrt_price >= sqrt_price_upper {
        let amount1 = amount1_delta(sqrt_price_lower, sqrt_price_upper, liquidity, rounding)?;
        Ok((0, amount1))
    } else {
        let amount0 = amount0_delta(sqrt_price, sqrt_price_upper, liquidity, rounding)?;
        let amount1 = amount1_delta(sqrt_price_lower, sqrt_price, liquidity, rounding)?;
        Ok((amount0, amount1))
    }
}

/// Apply a signed liquidity delta
#[inline]
pub fn add_delta(liquidity: u128, delta: i128) -> Result<u128, MathError> {
    if delta >= 0 {
        liquidity
            .checked_add(delta as u128)
            .ok_or(MathError::Overflow)
    } else {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(MathError::Underflow)
    }
}
