// Position Management Logic

use cl_math::{add_delta, is_aligned, is_valid_tick, Dec, MathError};
use cl_tick::{growth_at, Growth};
use soroban_sdk::Vec;

use crate::error::PositionError;
use crate::types::Position;

/// Earnings of `liquidity` between two checkpoints of one accumulator
fn earned(liquidity: u128, inside: Dec, last: Dec) -> Result<Dec, PositionError> {
    let delta = inside.wrapping_sub(last);
    if delta.is_wrapped_negative() {
        return Err(PositionError::NegativeGrowth);
    }
    Ok(delta.mul_int(liquidity)?)
}

/// Bring a position's owed amounts up to date and advance its checkpoints.
///
/// owed += liquidity * (inside_now - inside_last) for the two fee tracks
/// and every incentive track. A position without liquidity only moves its
/// checkpoints.
pub fn sync_position(pos: &mut Position, inside: &Growth) -> Result<(), PositionError> {
    if pos.liquidity > 0 {
        let fee_0 = earned(pos.liquidity, inside.fee_0, pos.fee_growth_inside_last_0)?;
        let fee_1 = earned(pos.liquidity, inside.fee_1, pos.fee_growth_inside_last_1)?;
        pos.tokens_owed_0 = pos.tokens_owed_0.checked_add(fee_0)?;
        pos.tokens_owed_1 = pos.tokens_owed_1.checked_add(fee_1)?;

        let env = inside.incentives.env();
        let mut owed = Vec::new(env);
        for (index, growth) in inside.incentives.iter().enumerate() {
            let index = index as u32;
            let reward = earned(
                pos.liquidity,
                growth,
                growth_at(&pos.incentive_growth_inside_last, index),
            )?;
            owed.push_back(growth_at(&pos.incentives_owed, index).checked_add(reward)?);
        }
        pos.incentives_owed = owed;
    } else {
        // Keep owed entries aligned with the tracks that exist
        while pos.incentives_owed.len() < inside.incentives.len() {
            pos.incentives_owed.push_back(Dec::ZERO);
        }
    }

    pos.fee_growth_inside_last_0 = inside.fee_0;
    pos.fee_growth_inside_last_1 = inside.fee_1;
    pos.incentive_growth_inside_last = inside.incentives.clone();

    Ok(())
}

/// Modify a position's liquidity
///
/// Earnings are synced first so they accrue to the liquidity that earned
/// them, then the delta is applied.
pub fn modify_position(
    pos: &mut Position,
    liquidity_delta: i128,
    inside: &Growth,
) -> Result<(), PositionError> {
    sync_position(pos, inside)?;

    pos.liquidity = add_delta(pos.liquidity, liquidity_delta).map_err(|err| match err {
        MathError::Underflow => PositionError::InsufficientLiquidity,
        other => PositionError::Math(other),
    })?;

    Ok(())
}

/// Validate position parameters
pub fn validate_position_params(lower: i32, upper: i32, tick_spacing: u32) -> Result<(), PositionError> {
    if lower >= upper {
        return Err(PositionError::InvalidRange);
    }

    if !is_valid_tick(lower) || !is_valid_tick(upper) {
        return Err(PositionError::TickOutOfRange);
    }

    if !is_aligned(lower, tick_spacing) || !is_aligned(upper, tick_spacing) {
        return Err(PositionError::TickNotAligned);
    }

    Ok(())
}
