use cl_math::*;

fn price(tick: i32) -> Dec {
    tick_to_sqrt_price(tick).unwrap()
}

// ============================================================
// AMOUNT DELTA TESTS
// ============================================================

#[test]
fn test_amounts_for_symmetric_range() {
    // [-100, 100] around price 1 with L = 1e6
    let (up0, up1) =
        amounts_for_liquidity(Dec::ONE, price(-100), price(100), 1_000_000, Rounding::Up).unwrap();
    let (down0, down1) =
        amounts_for_liquidity(Dec::ONE, price(-100), price(100), 1_000_000, Rounding::Down).unwrap();

    assert_eq!((up0, up1), (4988, 4988));
    assert_eq!((down0, down1), (4987, 4987));
}

#[test]
fn test_amount_delta_order_independent() {
    let a = price(-300);
    let b = price(700);
    assert_eq!(
        amount0_delta(a, b, 123_456_789, Rounding::Down).unwrap(),
        amount0_delta(b, a, 123_456_789, Rounding::Down).unwrap()
    );
    assert_eq!(
        amount1_delta(a, b, 123_456_789, Rounding::Up).unwrap(),
        amount1_delta(b, a, 123_456_789, Rounding::Up).unwrap()
    );
}

#[test]
fn test_amount_delta_degenerate() {
    assert_eq!(amount0_delta(Dec::ONE, Dec::ONE, 1_000, Rounding::Up).unwrap(), 0);
    assert_eq!(amount1_delta(price(-5), price(5), 0, Rounding::Up).unwrap(), 0);
}

#[test]
fn test_out_of_range_positions_hold_one_token() {
    let (amount0, amount1) =
        amounts_for_liquidity(price(-500), price(-100), price(100), 1_000_000, Rounding::Up).unwrap();
    assert!(amount0 > 0);
    assert_eq!(amount1, 0);

    let (amount0, amount1) =
        amounts_for_liquidity(price(500), price(-100), price(100), 1_000_000, Rounding::Up).unwrap();
    assert_eq!(amount0, 0);
    assert!(amount1 > 0);
}

#[test]
fn test_inverted_range_rejected() {
    assert_eq!(
        amounts_for_liquidity(Dec::ONE, price(10), price(-10), 1, Rounding::Up),
        Err(MathError::SqrtPriceOutOfRange)
    );
}

// ============================================================
// LIQUIDITY FOR AMOUNTS TESTS
// ============================================================

#[test]
fn test_liquidity_for_amounts_in_range() {
    let liquidity = liquidity_for_amounts(Dec::ONE, price(-100), price(100), 4988, 4988).unwrap();
    assert_eq!(liquidity, 1_000_145);

    // The binding side is the smaller one
    let limited = liquidity_for_amounts(Dec::ONE, price(-100), price(100), 4988, 100).unwrap();
    assert!(limited < liquidity);
}

#[test]
fn test_liquidity_for_amounts_never_overcharges() {
    let (lower, upper) = (price(-1_000), price(3_000));
    let liquidity = liquidity_for_amounts(Dec::ONE, lower, upper, 1_000_000, 2_000_000).unwrap();
    let (amount0, amount1) =
        amounts_for_liquidity(Dec::ONE, lower, upper, liquidity, Rounding::Up).unwrap();
    assert!(amount0 <= 1_000_000);
    assert!(amount1 <= 2_000_000);
}

#[test]
fn test_add_delta() {
    assert_eq!(add_delta(10, 5).unwrap(), 15);
    assert_eq!(add_delta(10, -10).unwrap(), 0);
    assert_eq!(add_delta(10, -11), Err(MathError::Underflow));
    assert_eq!(add_delta(u128::MAX, 1), Err(MathError::Overflow));
}
