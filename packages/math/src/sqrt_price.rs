// SPDX-License-Identifier: MIT
// Next Sqrt Price Calculations
//
// All quantities are raw `Dec` integers (value * 10^36, written S below).
// Prices move toward the side that keeps the pool solvent: token0 moves
// round the price up, token1 moves round it down.

use primitive_types::{U256, U512};

use crate::constants::DEC_ONE;
use crate::dec::{Dec, Rounding};
use crate::error::MathError;
use crate::full_math::{div_rounding, mul_div, narrow, widen};

#[inline]
fn scale() -> U512 {
    U512::from(DEC_ONE)
}

/// sqrt price after `amount` of token0 enters: L*s*S / (L*S + amount*s)
pub fn next_sqrt_price_from_amount0_in(
    sqrt_price: Dec,
    liquidity: u128,
    amount: u128,
) -> Result<Dec, MathError> {
    if amount == 0 {
        return Ok(sqrt_price);
    }
    let s = widen(sqrt_price.raw());
    let l = U512::from(liquidity);

    let numerator = l * s;
    let denominator = l * scale() + U512::from(amount) * s;
    let raw = mul_div(numerator, scale(), denominator, Rounding::Up)?;
    Ok(Dec::from_raw(narrow(raw)?))
}

/// sqrt price after `amount` of token1 enters: s + amount*S / L
pub fn next_sqrt_price_from_amount1_in(
    sqrt_price: Dec,
    liquidity: u128,
    amount: u128,
) -> Result<Dec, MathError> {
    if amount == 0 {
        return Ok(sqrt_price);
    }
    let quotient = mul_div(
        U512::from(amount),
        scale(),
        U512::from(liquidity),
        Rounding::Down,
    )?;
    let quotient = Dec::from_raw(narrow(quotient)?);
    sqrt_price.checked_add(quotient)
}

/// sqrt price after `amount` of token0 leaves: L*s*S / (L*S - amount*s)
pub fn next_sqrt_price_from_amount0_out(
    sqrt_price: Dec,
    liquidity: u128,
    amount: u128,
) -> Result<Dec, MathError> {
    if amount == 0 {
        return Ok(sqrt_price);
    }
    let s = widen(sqrt_price.raw());
    let l = U512::from(liquidity);

    let reserve = l * scale();
    let taken = U512::from(amount) * s;
    if taken >= reserve {
        return Err(MathError::Underflow);
    }
    let raw = mul_div(l * s, scale(), reserve - taken, Rounding::Up)?;
    Ok(Dec::from_raw(narrow(raw)?))
}

/// sqrt price after `amount` of token1 leaves: s - ceil(amount*S / L)
pub fn next_sqrt_price_from_amount1_out(
    sqrt_price: Dec,
    liquidity: u128,
    amount: u128,
) -> Result<Dec, MathError> {
    if amount == 0 {
        return Ok(sqrt_price);
    }
    let quotient = div_rounding(
        U512::from(amount) * scale(),
        U512::from(liquidity),
        Rounding::Up,
    )?;
    let quotient: U256 = narrow(quotient)?;
    if quotient >= sqrt_price.raw() {
        return Err(MathError::Underflow);
    }
    Ok(Dec::from_raw(sqrt_price.raw() - quotient))
}

/// Exact-in dispatch on swap direction
pub fn next_sqrt_price_from_input(
    sqrt_price: Dec,
    liquidity: u128,
    amount_in: u128,
    zero_for_one: bool,
) -> Result<Dec, MathError> {
    if liquidity == 0 {
        return Err(MathError::DivisionByZero);
    }
    if zero_for_one {
        next_sqrt_price_from_amount0_in(sqrt_price, liquidity, amount_in)
    } else {
        next_sqrt_price_from_amount1_in(sqrt_price, liquidity, amount_in)
    }
}

/// Exact-out dispatch on swap direction
pub fn next_sqrt_price_from_output(
    sqrt_price: Dec,
    liquidity: u128,
    amount_out: u128,
    zero_for_one: bool,
) -> Result<Dec, MathError> {
    if liquidity == 0 {
        return Err(MathError::DivisionByZero);
    }
    if zero_for_one {
        next_sqrt_price_from_amount1_out(sqrt_price, liquidity, amount_out)
    } else {
        next_sqrt_price_from_amount0_out(sqrt_price, liquidity, amount_out)
    }
}
