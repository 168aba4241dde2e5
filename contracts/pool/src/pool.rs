// Pool operations shared by the contract entry points

use cl_math::{add_delta, amounts_for_liquidity, tick_to_sqrt_price, Dec, Rounding};
use cl_position::{modify_position, sync_position, validate_position_params, Position, PositionInfo};
use cl_swap::{commit_tick_writes, SwapExecutor, SwapKind, SwapOutcome, SwapState};
use cl_tick::{clear_tick, flip_tick, range_growth_inside, update_tick, Growth, TickStore};
use soroban_sdk::{Address, Env, Vec};

use crate::error::PoolError;
use crate::incentives::accrue_incentives;
use crate::storage::{read_position, save_position, write_pool, PoolBitmap, PoolTicks};
use crate::types::{PoolState, SwapResult};

// ============================================================
// HELPERS
// ============================================================

pub fn to_amount(value: u128) -> Result<i128, PoolError> {
    i128::try_from(value).map_err(|_| PoolError::Overflow)
}

pub fn from_amount(value: i128) -> Result<u128, PoolError> {
    if value < 0 {
        return Err(PoolError::InvalidAmount);
    }
    Ok(value as u128)
}

pub fn range_prices(lower: i32, upper: i32) -> Result<(Dec, Dec), PoolError> {
    Ok((tick_to_sqrt_price(lower)?, tick_to_sqrt_price(upper)?))
}

/// Growth inside a range as of the pool's current accumulators
pub fn range_growth(env: &Env, pool: &PoolState, lower: i32, upper: i32) -> Growth {
    let ticks = PoolTicks::new(env, pool.id);
    range_growth_inside(
        env,
        &pool.global_growth(env),
        ticks.read_tick(lower).as_ref(),
        ticks.read_tick(upper).as_ref(),
        lower,
        upper,
        pool.current_tick,
    )
}

// ============================================================
// LIQUIDITY
// ============================================================

/// Add (`delta > 0`) or remove (`delta < 0`) liquidity from a position.
///
/// Returns the token amounts moved: rounded up when adding, down when
/// removing, so the pool never ends up short. Writes the pool back.
pub fn modify_liquidity(
    env: &Env,
    pool: &mut PoolState,
    owner: &Address,
    lower: i32,
    upper: i32,
    delta: i128,
) -> Result<(u128, u128), PoolError> {
    validate_position_params(lower, upper, pool.tick_spacing)?;
    if delta == 0 {
        return Err(PoolError::ZeroLiquidity);
    }

    let existing = read_position(env, pool.id, owner, lower, upper);
    let mut pos = match existing {
        Some(pos) => pos,
        None if delta < 0 => return Err(PoolError::PositionNotFound),
        None => Position::new(env),
    };
    if delta < 0 && pos.liquidity < delta.unsigned_abs() {
        return Err(PoolError::InsufficientLiquidity);
    }

    let (price_lower, price_upper) = range_prices(lower, upper)?;
    let rounding = if delta > 0 { Rounding::Up } else { Rounding::Down };
    let (amount0, amount1) = amounts_for_liquidity(
        pool.sqrt_price,
        price_lower,
        price_upper,
        delta.unsigned_abs(),
        rounding,
    )?;

    accrue_incentives(env, pool)?;
    let global = pool.global_growth(env);

    let mut ticks = PoolTicks::new(env, pool.id);
    let mut bitmap = PoolBitmap::new(env, pool.id);
    let current = pool.current_tick;

    let flipped_lower = update_tick(&mut ticks, lower, current, delta, &global, false)?;
    let flipped_upper = update_tick(&mut ticks, upper, current, delta, &global, true)?;

    // Emptied tick records still carry their outside growth here
    let inside = range_growth_inside(
        env,
        &global,
        ticks.read_tick(lower).as_ref(),
        ticks.read_tick(upper).as_ref(),
        lower,
        upper,
        current,
    );
    modify_position(&mut pos, delta, &inside)?;

    for (tick, flipped) in [(lower, flipped_lower), (upper, flipped_upper)] {
        if !flipped {
            continue;
        }
        flip_tick(&mut bitmap, tick, pool.tick_spacing)?;
        if delta < 0 {
            clear_tick(&mut ticks, tick)?;
        }
    }
    save_position(env, pool.id, owner, lower, upper, &pos);

    if lower <= current && current < upper {
        pool.liquidity = add_delta(pool.liquidity, delta)?;
    }
    write_pool(env, pool);

    Ok((amount0, amount1))
}

/// Sync a position to the pool's accumulators before paying anything out
pub fn load_synced_position(
    env: &Env,
    pool: &PoolState,
    owner: &Address,
    lower: i32,
    upper: i32,
) -> Result<Position, PoolError> {
    let mut pos =
        read_position(env, pool.id, owner, lower, upper).ok_or(PoolError::PositionNotFound)?;
    let inside = range_growth(env, pool, lower, upper);
    sync_position(&mut pos, &inside)?;
    Ok(pos)
}

/// Position with owed amounts brought up to the current ledger time
pub fn position_info(
    env: &Env,
    pool: &PoolState,
    owner: &Address,
    lower: i32,
    upper: i32,
) -> Result<PositionInfo, PoolError> {
    let mut pool = pool.clone();
    accrue_incentives(env, &mut pool)?;
    let pos = load_synced_position(env, &pool, owner, lower, upper)?;

    let (price_lower, price_upper) = range_prices(lower, upper)?;
    let (amount0, amount1) = amounts_for_liquidity(
        pool.sqrt_price,
        price_lower,
        price_upper,
        pos.liquidity,
        Rounding::Down,
    )?;

    let mut incentives_owed = Vec::new(env);
    for owed in pos.incentives_owed.iter() {
        incentives_owed.push_back(to_amount(owed.to_int(Rounding::Down)?)?);
    }

    Ok(PositionInfo {
        liquidity: pos.liquidity,
        amount0: to_amount(amount0)?,
        amount1: to_amount(amount1)?,
        fees_owed_0: to_amount(pos.tokens_owed_0.to_int(Rounding::Down)?)?,
        fees_owed_1: to_amount(pos.tokens_owed_1.to_int(Rounding::Down)?)?,
        incentives_owed,
    })
}

// ============================================================
// SWAPS
// ============================================================

/// Run a swap against the pool without writing anything
pub fn simulate_swap(
    env: &Env,
    pool: &PoolState,
    kind: SwapKind,
    zero_for_one: bool,
    amount: u128,
    sqrt_price_limit: Option<Dec>,
) -> Result<SwapOutcome, PoolError> {
    let ticks = PoolTicks::new(env, pool.id);
    let bitmap = PoolBitmap::new(env, pool.id);
    let state = SwapState {
        sqrt_price: pool.sqrt_price,
        current_tick: pool.current_tick,
        liquidity: pool.liquidity,
        tick_spacing: pool.tick_spacing,
        spread_factor: pool.spread_factor,
        global: pool.global_growth(env),
    };

    let executor = SwapExecutor::new(
        state,
        &ticks,
        &bitmap,
        kind,
        zero_for_one,
        amount,
        sqrt_price_limit,
    )?;
    Ok(executor.run()?)
}

/// Persist a completed swap: tick crossings first, then the pool fields
pub fn commit_swap(env: &Env, pool: &mut PoolState, outcome: &SwapOutcome) {
    let mut ticks = PoolTicks::new(env, pool.id);
    commit_tick_writes(&mut ticks, &outcome.tick_writes);

    let state = &outcome.state;
    pool.sqrt_price = state.sqrt_price;
    pool.current_tick = state.current_tick;
    pool.liquidity = state.liquidity;
    pool.fee_growth_global_0 = state.global.fee_0;
    pool.fee_growth_global_1 = state.global.fee_1;
    write_pool(env, pool);
}

pub fn swap_result(outcome: &SwapOutcome) -> Result<SwapResult, PoolError> {
    Ok(SwapResult {
        amount_in: to_amount(outcome.amount_in)?,
        amount_out: to_amount(outcome.amount_out)?,
        fee_amount: to_amount(outcome.fee_amount)?,
        sqrt_price: outcome.state.sqrt_price,
        current_tick: outcome.state.current_tick,
        liquidity: outcome.state.liquidity,
        ticks_crossed: outcome.ticks_crossed,
    })
}
