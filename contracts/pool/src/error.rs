// Pool contract errors
//
// Every package error is folded into one contracterror so callers see a
// stable numeric code. Codes are grouped by range:
// 100s initialization, 200s validation, 300s lookup, 400s liquidity,
// 500s swap, 600s authorization, 700s domain and invariant failures.

use cl_math::MathError;
use cl_position::PositionError;
use cl_swap::SwapError;
use cl_tick::TickError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    // Initialization errors (100-199)
    AlreadyInitialized = 100,
    NotInitialized = 101,

    // Validation errors (200-299)
    /// Module parameters are empty or out of range
    InvalidParams = 200,
    /// Tick spacing is not in the authorized set
    InvalidTickSpacing = 201,
    /// Spread factor is not in the authorized set
    InvalidSpreadFactor = 202,
    /// Lower tick must be below upper tick
    InvalidTickRange = 203,
    /// Tick outside [MIN_TICK, MAX_TICK]
    InvalidTick = 204,
    TickNotAligned = 205,
    SameToken = 206,
    /// Token does not belong to the pool
    InvalidToken = 207,
    InvalidAmount = 208,
    /// Initial price is zero or outside the representable range
    InvalidPrice = 209,
    InvalidPriceLimit = 210,
    TooManyIncentives = 211,
    InvalidEmissionRate = 212,

    // Lookup errors (300-399)
    PoolNotFound = 300,
    PositionNotFound = 301,
    TickNotFound = 302,

    // Liquidity errors (400-499)
    ZeroLiquidity = 400,
    /// Not enough liquidity in the position or in the swap direction
    InsufficientLiquidity = 401,
    LiquidityOverflow = 402,

    // Swap errors (500-599)
    SlippageExceeded = 500,

    // Authorization errors (600-699)
    Unauthorized = 600,

    // Domain errors (700-799)
    DivisionByZero = 700,
    Overflow = 701,
    Underflow = 702,
    /// Inside growth went backwards for a funded position
    NegativeGrowth = 703,
    TickOutOfBounds = 704,
    PriceOutOfBounds = 705,
    /// Internal consistency check failed
    InvariantViolation = 706,
}

impl From<MathError> for PoolError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::DivisionByZero => PoolError::DivisionByZero,
            MathError::Overflow => PoolError::Overflow,
            MathError::Underflow => PoolError::Underflow,
            MathError::TickOutOfRange => PoolError::TickOutOfBounds,
            MathError::SqrtPriceOutOfRange => PoolError::PriceOutOfBounds,
            MathError::InvalidSpreadFactor => PoolError::InvalidSpreadFactor,
        }
    }
}

impl From<TickError> for PoolError {
    fn from(err: TickError) -> Self {
        match err {
            TickError::Math(err) => err.into(),
            TickError::InvalidTick => PoolError::TickNotAligned,
            TickError::LiquidityUnderflow => PoolError::InsufficientLiquidity,
            TickError::LiquidityOverflow => PoolError::LiquidityOverflow,
            TickError::NotInitialized | TickError::StillReferenced => {
                PoolError::InvariantViolation
            }
        }
    }
}

impl From<PositionError> for PoolError {
    fn from(err: PositionError) -> Self {
        match err {
            PositionError::Math(err) => err.into(),
            PositionError::NegativeGrowth => PoolError::NegativeGrowth,
            PositionError::InsufficientLiquidity => PoolError::InsufficientLiquidity,
            PositionError::InvalidRange => PoolError::InvalidTickRange,
            PositionError::TickNotAligned => PoolError::TickNotAligned,
            PositionError::TickOutOfRange => PoolError::InvalidTick,
        }
    }
}

impl From<SwapError> for PoolError {
    fn from(err: SwapError) -> Self {
        match err {
            SwapError::Math(err) => err.into(),
            SwapError::Tick(err) => err.into(),
            SwapError::ZeroAmount => PoolError::InvalidAmount,
            SwapError::InvalidPriceLimit => PoolError::InvalidPriceLimit,
            SwapError::InsufficientLiquidity => PoolError::InsufficientLiquidity,
            SwapError::NoProgress => PoolError::InvariantViolation,
        }
    }
}
