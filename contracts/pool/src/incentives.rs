// Incentive accrual
//
// Tracks emit at a fixed rate per second until their funding runs out.
// Emissions are only consumed while liquidity is in range to earn them.

use cl_math::Dec;
use cl_tick::accrue_dec;
use soroban_sdk::{log, Address, Env, Vec};

use crate::error::PoolError;
use crate::types::{IncentiveTrack, PoolState};

/// Bring every incentive track up to the current ledger time
pub fn accrue_incentives(env: &Env, pool: &mut PoolState) -> Result<(), PoolError> {
    let now = env.ledger().timestamp();
    let elapsed = now.saturating_sub(pool.last_accrual_time);
    pool.last_accrual_time = now;

    if elapsed == 0 || pool.liquidity == 0 || pool.incentives.is_empty() {
        return Ok(());
    }

    let mut tracks = Vec::new(env);
    for mut track in pool.incentives.iter() {
        let emitted = match track.emission_rate.mul_int(elapsed as u128) {
            Ok(due) => due.min(track.remaining),
            Err(_) => track.remaining,
        };
        if !emitted.is_zero() {
            track.growth_global = accrue_dec(track.growth_global, emitted, pool.liquidity)?;
            track.remaining = track.remaining.checked_sub(emitted)?;
        }
        tracks.push_back(track);
    }
    pool.incentives = tracks;

    log!(env, "incentives accrued", pool.id, elapsed);
    Ok(())
}

/// Append a funded track and return its index
pub fn add_track(
    pool: &mut PoolState,
    reward_token: &Address,
    amount: u128,
    emission_rate: Dec,
    max_tracks: u32,
) -> Result<u32, PoolError> {
    if pool.incentives.len() >= max_tracks {
        return Err(PoolError::TooManyIncentives);
    }
    if emission_rate.is_zero() {
        return Err(PoolError::InvalidEmissionRate);
    }

    pool.incentives.push_back(IncentiveTrack {
        reward_token: reward_token.clone(),
        emission_rate,
        remaining: Dec::from_int(amount),
        growth_global: Dec::ZERO,
    });
    Ok(pool.incentives.len() - 1)
}
