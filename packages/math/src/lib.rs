// Concentrated-Liquidity Math Package
//
// Decimal fixed point, tick/price conversion and the closed-form
// formulas behind liquidity and swap steps.

#![no_std]

pub mod constants;
pub mod dec;
pub mod error;
pub mod full_math;
pub mod liquidity;
pub mod sqrt_price;
pub mod swap_math;
pub mod tick_math;

pub use constants::*;

pub use dec::{Dec, Rounding};
pub use error::MathError;

pub use tick_math::{
    is_aligned,
    is_valid_tick,
    price_to_tick,
    sqrt_price_to_tick,
    tick_to_sqrt_price,
    MAX_SQRT_PRICE,
    MIN_SQRT_PRICE,
};

pub use liquidity::{
    add_delta,
    amount0_delta,
    amount1_delta,
    amounts_for_liquidity,
    liquidity_for_amount0,
    liquidity_for_amount1,
    liquidity_for_amounts,
};

pub use sqrt_price::{next_sqrt_price_from_input, next_sqrt_price_from_output};

pub use swap_math::{compute_swap_step, SwapStep};
