use cl_math::MathError;
use cl_tick::TickError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SwapError {
    Math(MathError),
    Tick(TickError),
    ZeroAmount,
    /// Limit on the wrong side of the price or beyond the price bounds
    InvalidPriceLimit,
    /// No initialized tick left in the swap direction
    InsufficientLiquidity,
    /// A step moved neither price nor amounts
    NoProgress,
}

impl From<MathError> for SwapError {
    fn from(err: MathError) -> Self {
        SwapError::Math(err)
    }
}

impl From<TickError> for SwapError {
    fn from(err: TickError) -> Self {
        SwapError::Tick(err)
    }
}
