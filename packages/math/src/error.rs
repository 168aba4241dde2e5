// SPDX-License-Identifier: MIT
// Math Errors

/// Domain failures of the fixed-point layer.
///
/// None of these are reachable from validated user input; callers treat
/// them as fatal to the operation in progress.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum MathError {
    DivisionByZero,
    Overflow,
    /// An unsigned operation would have produced a negative value
    Underflow,
    TickOutOfRange,
    SqrtPriceOutOfRange,
    InvalidSpreadFactor,
}
