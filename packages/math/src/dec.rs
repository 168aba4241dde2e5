// SPDX-License-Identifier: MIT
// Decimal Fixed-Point Type

use primitive_types::{U256, U512};
use soroban_sdk::contracttype;

use crate::constants::{DEC_DECIMALS, DEC_ONE};
use crate::error::MathError;
use crate::full_math::{div_rounding, mul_div, narrow, narrow_u128, widen};

/// Rounding policy for every lossy operation
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rounding {
    /// Toward zero
    Down,
    /// Away from zero
    Up,
    /// Half to even
    Bankers,
}

/// Unsigned decimal with 36 fractional digits.
///
/// The raw value is a 256-bit integer equal to `value * 10^36`, kept as two
/// `u128` halves so it encodes canonically in contract storage. Field order
/// makes the derived ordering numeric.
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct Dec {
    pub hi: u128,
    pub lo: u128,
}

impl Dec {
    pub const DECIMALS: u32 = DEC_DECIMALS;
    pub const ZERO: Dec = Dec { hi: 0, lo: 0 };
    pub const ONE: Dec = Dec { hi: 0, lo: DEC_ONE };

    #[inline]
    pub const fn from_raw_parts(hi: u128, lo: u128) -> Self {
        Dec { hi, lo }
    }

    pub fn from_raw(raw: U256) -> Self {
        let limbs = raw.0;
        Dec {
            hi: ((limbs[3] as u128) << 64) | limbs[2] as u128,
            lo: ((limbs[1] as u128) << 64) | limbs[0] as u128,
        }
    }

    pub fn raw(self) -> U256 {
        U256([
            self.lo as u64,
            (self.lo >> 64) as u64,
            self.hi as u64,
            (self.hi >> 64) as u64,
        ])
    }

    /// Whole number; `u128::MAX * 10^36` still fits in 256 bits
    pub fn from_int(value: u128) -> Self {
        Self::from_raw(U256::from(value) * U256::from(DEC_ONE))
    }

    pub fn from_ratio(numerator: u128, denominator: u128, rounding: Rounding) -> Result<Self, MathError> {
        let raw = mul_div(
            U512::from(numerator),
            U512::from(DEC_ONE),
            U512::from(denominator),
            rounding,
        )?;
        Ok(Self::from_raw(narrow(raw)?))
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    pub fn checked_add(self, rhs: Dec) -> Result<Dec, MathError> {
        self.raw()
            .checked_add(rhs.raw())
            .map(Self::from_raw)
            .ok_or(MathError::Overflow)
    }

    pub fn checked_sub(self, rhs: Dec) -> Result<Dec, MathError> {
        self.raw()
            .checked_sub(rhs.raw())
            .map(Self::from_raw)
            .ok_or(MathError::Underflow)
    }

    /// Addition modulo 2^256, for accumulator reference frames
    pub fn wrapping_add(self, rhs: Dec) -> Dec {
        Self::from_raw(self.raw().overflowing_add(rhs.raw()).0)
    }

    /// Subtraction modulo 2^256, for accumulator reference frames
    pub fn wrapping_sub(self, rhs: Dec) -> Dec {
        Self::from_raw(self.raw().overflowing_sub(rhs.raw()).0)
    }

    /// Top bit set: read as two's complement, the value is negative.
    /// Real growth never comes near 2^255, so this only happens when a
    /// wrapping difference went below zero.
    #[inline]
    pub fn is_wrapped_negative(self) -> bool {
        self.hi >> 127 == 1
    }

    pub fn mul(self, rhs: Dec, rounding: Rounding) -> Result<Dec, MathError> {
        let raw = mul_div(
            widen(self.raw()),
            widen(rhs.raw()),
            U512::from(DEC_ONE),
            rounding,
        )?;
        Ok(Self::from_raw(narrow(raw)?))
    }

    pub fn div(self, rhs: Dec, rounding: Rounding) -> Result<Dec, MathError> {
        if rhs.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        let raw = mul_div(
            widen(self.raw()),
            U512::from(DEC_ONE),
            widen(rhs.raw()),
            rounding,
        )?;
        Ok(Self::from_raw(narrow(raw)?))
    }

    /// Exact product with a whole number
    pub fn mul_int(self, rhs: u128) -> Result<Dec, MathError> {
        self.raw()
            .checked_mul(U256::from(rhs))
            .map(Self::from_raw)
            .ok_or(MathError::Overflow)
    }

    pub fn div_int(self, rhs: u128, rounding: Rounding) -> Result<Dec, MathError> {
        let raw = div_rounding(widen(self.raw()), U512::from(rhs), rounding)?;
        Ok(Self::from_raw(narrow(raw)?))
    }

    pub fn sqrt(self, rounding: Rounding) -> Result<Dec, MathError> {
        // sqrt(raw / 10^36) * 10^36 == sqrt(raw * 10^36)
        let scaled = widen(self.raw()) * U512::from(DEC_ONE);
        let root = scaled.integer_sqrt();
        let square = root * root;

        let round_up = match rounding {
            Rounding::Down => false,
            Rounding::Up => square < scaled,
            // (root + 1/2)^2 = root^2 + root + 1/4, so ties cannot occur
            Rounding::Bankers => scaled - square > root,
        };
        let root = if round_up { root + U512::one() } else { root };

        Ok(Self::from_raw(narrow(root)?))
    }

    /// Whole-number part under the given rounding
    pub fn to_int(self, rounding: Rounding) -> Result<u128, MathError> {
        let whole = div_rounding(widen(self.raw()), U512::from(DEC_ONE), rounding)?;
        narrow_u128(whole)
    }
}
