// Tick Update and Crossing Logic

use cl_math::{add_delta, Dec, MathError};
use soroban_sdk::Vec;

use crate::error::TickError;
use crate::store::TickStore;
use crate::types::{growth_at, Growth, TickInfo};

/// Update a tick when liquidity is added or removed.
///
/// Returns `true` when the tick flipped between initialized and
/// uninitialized, so the caller can toggle its bitmap bit. A tick whose
/// gross liquidity returns to zero keeps its record, outside growth
/// included, until the caller clears it with [`clear_tick`] after reading
/// the range's inside growth.
pub fn update_tick<S: TickStore>(
    store: &mut S,
    tick: i32,
    current_tick: i32,
    liquidity_delta: i128,
    global: &Growth,
    upper: bool,
) -> Result<bool, TickError> {
    let mut info = store
        .read_tick(tick)
        .unwrap_or_else(|| TickInfo::new(store.env()));

    let gross_before = info.liquidity_gross;
    let gross_after = add_delta(gross_before, liquidity_delta).map_err(|err| match err {
        MathError::Underflow => TickError::LiquidityUnderflow,
        _ => TickError::LiquidityOverflow,
    })?;

    let net_after = if upper {
        info.liquidity_net.checked_sub(liquidity_delta)
    } else {
        info.liquidity_net.checked_add(liquidity_delta)
    }
    .ok_or(TickError::LiquidityOverflow)?;

    let flipped = (gross_after == 0) != (gross_before == 0);

    if gross_before == 0 {
        // All growth so far is taken to have happened below the tick
        if tick <= current_tick {
            info.fee_growth_outside_0 = global.fee_0;
            info.fee_growth_outside_1 = global.fee_1;
            info.incentive_growth_outside = global.incentives.clone();
        } else {
            info.fee_growth_outside_0 = Dec::ZERO;
            info.fee_growth_outside_1 = Dec::ZERO;
            info.incentive_growth_outside = Vec::new(store.env());
        }
    }

    info.liquidity_gross = gross_after;
    info.liquidity_net = net_after;
    store.write_tick(tick, &info);

    Ok(flipped)
}

/// Drop the record of a tick that no longer holds any liquidity
pub fn clear_tick<S: TickStore>(store: &mut S, tick: i32) -> Result<(), TickError> {
    match store.read_tick(tick) {
        Some(info) if info.liquidity_gross == 0 => {
            store.remove_tick(tick);
            Ok(())
        }
        Some(_) => Err(TickError::StillReferenced),
        None => Err(TickError::NotInitialized),
    }
}

/// Cross a tick boundary during a swap.
///
/// Flips every outside accumulator to the other side of the tick and
/// returns the tick's net liquidity.
pub fn cross_tick<S: TickStore>(store: &mut S, tick: i32, global: &Growth) -> Result<i128, TickError> {
    let mut info = store.read_tick(tick).ok_or(TickError::NotInitialized)?;

    info.fee_growth_outside_0 = global.fee_0.wrapping_sub(info.fee_growth_outside_0);
    info.fee_growth_outside_1 = global.fee_1.wrapping_sub(info.fee_growth_outside_1);

    let mut incentives = Vec::new(store.env());
    for (index, global_growth) in global.incentives.iter().enumerate() {
        let outside = growth_at(&info.incentive_growth_outside, index as u32);
        incentives.push_back(global_growth.wrapping_sub(outside));
    }
    info.incentive_growth_outside = incentives;

    store.write_tick(tick, &info);

    Ok(info.liquidity_net)
}
