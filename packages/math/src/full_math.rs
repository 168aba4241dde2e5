// SPDX-License-Identifier: MIT
// 512-bit Intermediate Arithmetic
//
// Every product or quotient in the engine goes through here so that it is
// rounded exactly once, in the direction the caller asks for.

use primitive_types::{U256, U512};

use crate::dec::Rounding;
use crate::error::MathError;

#[inline]
pub fn widen(x: U256) -> U512 {
    U512::from(x)
}

#[inline]
pub fn narrow(x: U512) -> Result<U256, MathError> {
    U256::try_from(x).map_err(|_| MathError::Overflow)
}

#[inline]
pub fn narrow_u128(x: U512) -> Result<u128, MathError> {
    if x > U512::from(u128::MAX) {
        return Err(MathError::Overflow);
    }
    Ok(x.low_u128())
}

/// `numerator / denominator` with an explicit rounding policy
pub fn div_rounding(
    numerator: U512,
    denominator: U512,
    rounding: Rounding,
) -> Result<U512, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let (quotient, remainder) = numerator.div_mod(denominator);
    if remainder.is_zero() {
        return Ok(quotient);
    }

    let round_up = match rounding {
        Rounding::Down => false,
        Rounding::Up => true,
        Rounding::Bankers => {
            // remainder vs. denominator / 2 without doubling the remainder
            let rest = denominator - remainder;
            match remainder.cmp(&rest) {
                core::cmp::Ordering::Greater => true,
                core::cmp::Ordering::Less => false,
                core::cmp::Ordering::Equal => quotient.bit(0),
            }
        }
    };

    if round_up {
        quotient.checked_add(U512::one()).ok_or(MathError::Overflow)
    } else {
        Ok(quotient)
    }
}

/// `a * b / denominator` with a full 512-bit product
#[inline]
pub fn mul_div(
    a: U512,
    b: U512,
    denominator: U512,
    rounding: Rounding,
) -> Result<U512, MathError> {
    let product = a.checked_mul(b).ok_or(MathError::Overflow)?;
    div_rounding(product, denominator, rounding)
}

/// `a * b / denominator` for a token amount scaled by a 256-bit factor
pub fn mul_div_u128(
    a: u128,
    b: U256,
    denominator: U256,
    rounding: Rounding,
) -> Result<u128, MathError> {
    let result = mul_div(U512::from(a), widen(b), widen(denominator), rounding)?;
    narrow_u128(result)
}
