// Tick Errors

use cl_math::MathError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TickError {
    Math(MathError),
    /// Outside [MIN_TICK, MAX_TICK] or not a multiple of the spacing
    InvalidTick,
    /// Gross liquidity would go below zero
    LiquidityUnderflow,
    LiquidityOverflow,
    /// Crossing a tick that holds no liquidity
    NotInitialized,
    /// Clearing a tick that still holds liquidity
    StillReferenced,
}

impl From<MathError> for TickError {
    fn from(err: MathError) -> Self {
        TickError::Math(err)
    }
}
