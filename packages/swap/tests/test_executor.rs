use cl_math::{tick_to_sqrt_price, Dec, Rounding};
use cl_swap::*;
use cl_tick::*;
use proptest::prelude::*;
use soroban_sdk::Env;

const L: u128 = 1_000_000_000_000;

struct Book {
    env: Env,
    ticks: MemoryTicks,
    bitmap: MemoryBitmap,
}

impl Book {
    fn new() -> Self {
        let env = Env::default();
        Self {
            ticks: MemoryTicks::new(&env),
            bitmap: MemoryBitmap::new(&env),
            env,
        }
    }

    /// Add liquidity the way a pool sitting at tick 0 would
    fn add(&mut self, lower: i32, upper: i32, liquidity: u128) {
        let global = Growth::zero(&self.env);
        let delta = liquidity as i128;
        if update_tick(&mut self.ticks, lower, 0, delta, &global, false).unwrap() {
            flip_tick(&mut self.bitmap, lower, 1).unwrap();
        }
        if update_tick(&mut self.ticks, upper, 0, delta, &global, true).unwrap() {
            flip_tick(&mut self.bitmap, upper, 1).unwrap();
        }
    }

    fn state(&self, liquidity: u128) -> SwapState {
        SwapState {
            sqrt_price: Dec::ONE,
            current_tick: 0,
            liquidity,
            tick_spacing: 1,
            spread_factor: Dec::from_ratio(3, 1_000, Rounding::Down).unwrap(),
            global: Growth::zero(&self.env),
        }
    }

    fn swap(
        &self,
        liquidity: u128,
        kind: SwapKind,
        zero_for_one: bool,
        amount: u128,
        limit: Option<Dec>,
    ) -> Result<SwapOutcome, SwapError> {
        SwapExecutor::new(
            self.state(liquidity),
            &self.ticks,
            &self.bitmap,
            kind,
            zero_for_one,
            amount,
            limit,
        )?
        .run()
    }
}

fn price(tick: i32) -> Dec {
    tick_to_sqrt_price(tick).unwrap()
}

// ============================================================
// WITHIN ONE RANGE
// ============================================================

#[test]
fn test_exact_in_within_range() {
    let mut book = Book::new();
    book.add(-1_000, 1_000, L);

    let outcome = book.swap(L, SwapKind::ExactIn, true, 1_000_000, None).unwrap();

    assert_eq!(outcome.amount_in, 1_000_000);
    assert_eq!(outcome.amount_out, 996_999);
    assert_eq!(outcome.fee_amount, 3_000);
    assert_eq!(outcome.ticks_crossed, 0);
    assert_eq!(outcome.state.current_tick, -1);
    assert_eq!(outcome.state.liquidity, L);
    assert_eq!(
        outcome.state.global.fee_0,
        Dec::from_ratio(3_000, L, Rounding::Down).unwrap()
    );
    assert_eq!(outcome.state.global.fee_1, Dec::ZERO);
}

#[test]
fn test_exact_out_within_range() {
    let mut book = Book::new();
    book.add(-1_000, 1_000, L);

    let outcome = book.swap(L, SwapKind::ExactOut, true, 500_000, None).unwrap();

    assert_eq!(outcome.amount_out, 500_000);
    assert_eq!(outcome.amount_in, 500_001 + 1_505);
    assert_eq!(outcome.fee_amount, 1_505);
}

#[test]
fn test_partial_fill_at_limit() {
    let mut book = Book::new();
    book.add(-10, 10, L);

    let limit = price(-5);
    let outcome = book
        .swap(L, SwapKind::ExactIn, true, 1_000_000_000_000, Some(limit))
        .unwrap();

    assert_eq!(outcome.state.sqrt_price, limit);
    assert_eq!(outcome.state.current_tick, -5);
    assert!(outcome.amount_in < 1_000_000_000_000);
    assert!(outcome.amount_out > 0);
    assert_eq!(outcome.ticks_crossed, 0);
}

// ============================================================
// CROSSING TICKS
// ============================================================

#[test]
fn test_cross_into_adjacent_range() {
    let mut book = Book::new();
    book.add(-10, 10, L);
    book.add(-30, -10, 2 * L);

    let outcome = book
        .swap(L, SwapKind::ExactIn, true, 1_000_000_000_000, Some(price(-20)))
        .unwrap();

    assert_eq!(outcome.ticks_crossed, 1);
    assert_eq!(outcome.state.liquidity, 2 * L);
    assert_eq!(outcome.state.current_tick, -20);
    assert!(outcome.tick_writes.contains_key(-10));

    // The base store is untouched until the caller commits
    let base = book.ticks.read_tick(-10).unwrap();
    assert_eq!(base.fee_growth_outside_0, Dec::ZERO);
    // Outside growth holds what accrued before the crossing
    let written = outcome.tick_writes.get(-10).unwrap().unwrap();
    assert!(written.fee_growth_outside_0 > Dec::ZERO);
    assert!(written.fee_growth_outside_0 < outcome.state.global.fee_0);
}

#[test]
fn test_limit_on_tick_price_crosses_it() {
    let mut book = Book::new();
    book.add(-10, 10, L);
    book.add(-30, -10, 2 * L);

    let outcome = book
        .swap(L, SwapKind::ExactIn, true, 1_000_000_000_000, Some(price(-10)))
        .unwrap();

    assert_eq!(outcome.state.sqrt_price, price(-10));
    assert_eq!(outcome.ticks_crossed, 1);
    assert_eq!(outcome.state.current_tick, -11);
    assert_eq!(outcome.state.liquidity, 2 * L);
}

#[test]
fn test_upward_cross_lands_on_tick() {
    let mut book = Book::new();
    book.add(-10, 10, L);
    book.add(10, 40, 3 * L);

    let outcome = book
        .swap(L, SwapKind::ExactIn, false, 1_000_000_000_000, Some(price(10)))
        .unwrap();

    assert_eq!(outcome.state.current_tick, 10);
    assert_eq!(outcome.state.liquidity, 3 * L);
}

#[test]
fn test_long_swap_crosses_every_tick() {
    let mut book = Book::new();
    book.env.cost_estimate().budget().reset_unlimited();
    for lower in 0..1_100 {
        book.add(lower, lower + 1, 1_000_000);
    }

    let outcome = book
        .swap(1_000_000, SwapKind::ExactIn, false, 1_000_000_000, Some(price(1_100)))
        .unwrap();

    assert_eq!(outcome.ticks_crossed, 1_100);
    assert_eq!(outcome.state.current_tick, 1_100);
    assert_eq!(outcome.state.sqrt_price, price(1_100));
    assert_eq!(outcome.state.liquidity, 0);
    assert!(outcome.amount_in < 1_000_000_000);
    assert!(outcome.amount_out > 0);
}

#[test]
fn test_running_out_of_ticks_fails() {
    let mut book = Book::new();
    book.add(-10, 10, L);

    let result = book.swap(L, SwapKind::ExactIn, true, 1_000_000_000_000_000, None);
    assert_eq!(result.unwrap_err(), SwapError::InsufficientLiquidity);
}

#[test]
fn test_commit_applies_crossings() {
    let mut book = Book::new();
    book.add(-10, 10, L);
    book.add(-30, -10, 2 * L);

    let outcome = book
        .swap(L, SwapKind::ExactIn, true, 1_000_000_000_000, Some(price(-20)))
        .unwrap();
    commit_tick_writes(&mut book.ticks, &outcome.tick_writes);

    assert_eq!(
        book.ticks.read_tick(-10),
        outcome.tick_writes.get(-10).unwrap()
    );
}

// ============================================================
// VALIDATION
// ============================================================

#[test]
fn test_limit_on_wrong_side() {
    let mut book = Book::new();
    book.add(-10, 10, L);

    let above = Some(price(5));
    assert_eq!(
        book.swap(L, SwapKind::ExactIn, true, 1_000, above).unwrap_err(),
        SwapError::InvalidPriceLimit
    );
    assert_eq!(
        book.swap(L, SwapKind::ExactIn, false, 1_000, Some(Dec::ONE)).unwrap_err(),
        SwapError::InvalidPriceLimit
    );
}

#[test]
fn test_zero_amount_rejected() {
    let book = Book::new();
    assert_eq!(
        book.swap(0, SwapKind::ExactIn, true, 0, None).unwrap_err(),
        SwapError::ZeroAmount
    );
}

#[test]
fn test_step_by_step_status() {
    let mut book = Book::new();
    book.add(-10, 10, L);
    book.add(-30, -10, 2 * L);

    let mut executor = SwapExecutor::new(
        book.state(L),
        &book.ticks,
        &book.bitmap,
        SwapKind::ExactIn,
        true,
        1_000_000_000_000,
        Some(price(-20)),
    )
    .unwrap();

    assert_eq!(executor.step(), SwapStatus::Active);
    assert_eq!(executor.state().current_tick, -11);
    assert_eq!(executor.step(), SwapStatus::Completed);
    assert_eq!(executor.step(), SwapStatus::Completed);
}

// ============================================================
// PROPERTIES
// ============================================================

const BASE: (i32, i32) = (-1_000, 1_000);

/// Liquidity of every range that covers `tick`
fn active_at(ranges: &[(i32, i32, u128)], tick: i32) -> u128 {
    ranges
        .iter()
        .filter(|(lower, upper, _)| *lower <= tick && tick < *upper)
        .map(|(_, _, liquidity)| liquidity)
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Exact-in swaps from price 1.0 over random layouts never charge more
    /// than asked, never pay out more than they take in, and leave the
    /// working liquidity equal to the ranges covering the final tick.
    #[test]
    fn prop_exact_in_never_overpays(
        layout in prop::collection::vec(
            (-900i32..900, 1i32..100, 1_000_000_000u128..10_000_000_000_000),
            0..8,
        ),
        zero_for_one in any::<bool>(),
        amount in 1u128..1_000_000_000_000,
    ) {
        let mut book = Book::new();
        let mut ranges = vec![(BASE.0, BASE.1, L)];
        ranges.extend(layout.iter().map(|(lower, width, liquidity)| (*lower, lower + width, *liquidity)));
        for (lower, upper, liquidity) in ranges.iter() {
            book.add(*lower, *upper, *liquidity);
        }

        let limit = if zero_for_one { price(BASE.0) } else { price(BASE.1) };
        let outcome = book
            .swap(active_at(&ranges, 0), SwapKind::ExactIn, zero_for_one, amount, Some(limit))
            .unwrap();

        prop_assert!(outcome.amount_in <= amount);
        prop_assert!(outcome.fee_amount <= outcome.amount_in);
        // Starting at price 1.0 the output is worth at most the input
        prop_assert!(outcome.amount_out <= outcome.amount_in);
        if outcome.state.sqrt_price != limit {
            prop_assert_eq!(outcome.amount_in, amount);
        }
        prop_assert_eq!(outcome.state.liquidity, active_at(&ranges, outcome.state.current_tick));
    }
}
