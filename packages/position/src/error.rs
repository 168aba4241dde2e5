use cl_math::MathError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PositionError {
    Math(MathError),
    /// Inside growth went backwards since the last checkpoint
    NegativeGrowth,
    InsufficientLiquidity,
    InvalidRange,
    TickNotAligned,
    TickOutOfRange,
}

impl From<MathError> for PositionError {
    fn from(err: MathError) -> Self {
        PositionError::Math(err)
    }
}
