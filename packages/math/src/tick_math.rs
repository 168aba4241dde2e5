// SPDX-License-Identifier: MIT
// Tick <-> Sqrt Price Conversion

use crate::constants::{MAX_SQRT_PRICE_RAW, MAX_TICK, MIN_SQRT_PRICE_RAW, MIN_TICK, SQRT_POWERS};
use crate::dec::{Dec, Rounding};
use crate::error::MathError;

pub const MIN_SQRT_PRICE: Dec = Dec::from_raw_parts(MIN_SQRT_PRICE_RAW.0, MIN_SQRT_PRICE_RAW.1);
pub const MAX_SQRT_PRICE: Dec = Dec::from_raw_parts(MAX_SQRT_PRICE_RAW.0, MAX_SQRT_PRICE_RAW.1);

#[inline]
pub fn is_valid_tick(tick: i32) -> bool {
    (MIN_TICK..=MAX_TICK).contains(&tick)
}

#[inline]
pub fn is_aligned(tick: i32, spacing: u32) -> bool {
    spacing > 0 && tick.rem_euclid(spacing as i32) == 0
}

/// Convert tick to sqrt price.
/// Formula: sqrt(1.0001)^tick, one factor per set bit of |tick|
pub fn tick_to_sqrt_price(tick: i32) -> Result<Dec, MathError> {
    if !is_valid_tick(tick) {
        return Err(MathError::TickOutOfRange);
    }

    let abs_tick = tick.unsigned_abs();
    let mut ratio = Dec::ONE;
    for (i, (hi, lo)) in SQRT_POWERS.iter().enumerate() {
        if abs_tick & (1 << i) != 0 {
            ratio = ratio.mul(Dec::from_raw_parts(*hi, *lo), Rounding::Bankers)?;
        }
    }

    if tick < 0 {
        ratio = Dec::ONE.div(ratio, Rounding::Bankers)?;
    }

    Ok(ratio)
}

/// Largest tick whose sqrt price is <= `sqrt_price`.
///
/// Binary search over the monotonic mapping above, so converting a tick's
/// own price always gives that tick back.
pub fn sqrt_price_to_tick(sqrt_price: Dec) -> Result<i32, MathError> {
    if sqrt_price < MIN_SQRT_PRICE || sqrt_price > MAX_SQRT_PRICE {
        return Err(MathError::SqrtPriceOutOfRange);
    }

    let mut lo = MIN_TICK;
    let mut hi = MAX_TICK;
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if tick_to_sqrt_price(mid)? <= sqrt_price {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    Ok(lo)
}

/// Tick for a spot price (not its square root)
pub fn price_to_tick(price: Dec) -> Result<i32, MathError> {
    sqrt_price_to_tick(price.sqrt(Rounding::Down)?)
}
