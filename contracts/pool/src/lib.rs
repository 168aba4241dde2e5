#![no_std]

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

// External packages
use cl_math::{
    amounts_for_liquidity, liquidity_for_amounts, sqrt_price_to_tick, Dec, Rounding, MAX_PAGE_LIMIT,
    MAX_SQRT_PRICE, MIN_SQRT_PRICE,
};
use cl_position::{
    collect_fees as pay_out_fees, collect_incentives as pay_out_incentives,
    validate_position_params,
};
use cl_swap::SwapKind;
use cl_tick::{next_initialized_tick, TickStore};

// Local modules
mod error;
mod events;
mod incentives;
mod pool;
mod storage;
pub mod types;

pub use error::PoolError;
use events::*;
use incentives::{accrue_incentives, add_track};
use pool::*;
use storage::*;
use types::{AddLiquidityResult, Params, PoolState, PositionInfo, SwapResult, TickEntry, TickInfo};

#[contract]
pub struct ClPool;

#[contractimpl]
impl ClPool {
    // ========================================================
    // ADMINISTRATION
    // ========================================================

    /// Set the module admin and parameters, once
    pub fn initialize(env: Env, admin: Address, params: Params) -> Result<(), PoolError> {
        admin.require_auth();

        if has_admin(&env) {
            return Err(PoolError::AlreadyInitialized);
        }
        params.validate()?;

        write_admin(&env, &admin);
        write_params(&env, &params);
        extend_instance_ttl(&env);

        emit_params(&env, &params);
        Ok(())
    }

    /// Replace the module parameters; existing pools keep their settings
    pub fn set_params(env: Env, caller: Address, params: Params) -> Result<(), PoolError> {
        caller.require_auth();

        if caller != read_admin(&env)? {
            return Err(PoolError::Unauthorized);
        }
        params.validate()?;

        write_params(&env, &params);
        extend_instance_ttl(&env);

        emit_params(&env, &params);
        Ok(())
    }

    // ========================================================
    // POOL CREATION
    // ========================================================

    /// Create a pool for a token pair at a spot price of token1 per token0.
    ///
    /// # Arguments
    /// * `token_a`, `token_b` - Pair in any order; stored sorted
    /// * `tick_spacing` - Must be an authorized spacing
    /// * `spread_factor` - Swap fee rate, must be authorized
    /// * `initial_price` - Spot price, not its square root
    pub fn create_pool(
        env: Env,
        creator: Address,
        token_a: Address,
        token_b: Address,
        tick_spacing: u32,
        spread_factor: Dec,
        initial_price: Dec,
    ) -> Result<u64, PoolError> {
        creator.require_auth();

        let params = read_params(&env)?;
        if !params.allows_tick_spacing(tick_spacing) {
            return Err(PoolError::InvalidTickSpacing);
        }
        if !params.allows_spread_factor(spread_factor) {
            return Err(PoolError::InvalidSpreadFactor);
        }
        if token_a == token_b {
            return Err(PoolError::SameToken);
        }

        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        let sqrt_price = initial_price.sqrt(Rounding::Down)?;
        if sqrt_price < MIN_SQRT_PRICE || sqrt_price > MAX_SQRT_PRICE {
            return Err(PoolError::InvalidPrice);
        }
        let current_tick = sqrt_price_to_tick(sqrt_price)?;

        let id = read_next_pool_id(&env);
        let pool = PoolState {
            id,
            token0,
            token1,
            tick_spacing,
            spread_factor,
            sqrt_price,
            current_tick,
            liquidity: 0,
            fee_growth_global_0: Dec::ZERO,
            fee_growth_global_1: Dec::ZERO,
            incentives: Vec::new(&env),
            last_accrual_time: env.ledger().timestamp(),
        };

        write_pool(&env, &pool);
        write_next_pool_id(&env, id + 1);
        extend_instance_ttl(&env);

        emit_pool_created(
            &env,
            id,
            &creator,
            &pool.token0,
            &pool.token1,
            tick_spacing,
            spread_factor,
            sqrt_price,
            current_tick,
        );
        Ok(id)
    }

    // ========================================================
    // SWAPS
    // ========================================================

    /// Spend exactly `amount_in` of `token_in`.
    ///
    /// Stops early at `sqrt_price_limit` (default: the price bound in the
    /// swap direction); `min_amount_out` guards against unwanted partial fills.
    pub fn swap_exact_in(
        env: Env,
        sender: Address,
        pool_id: u64,
        token_in: Address,
        amount_in: i128,
        min_amount_out: i128,
        sqrt_price_limit: Option<Dec>,
    ) -> Result<SwapResult, PoolError> {
        sender.require_auth();

        if amount_in <= 0 || min_amount_out < 0 {
            return Err(PoolError::InvalidAmount);
        }

        let mut pool = read_pool(&env, pool_id)?;
        let zero_for_one = pool.zero_for_one(&token_in)?;
        accrue_incentives(&env, &mut pool)?;

        let outcome = simulate_swap(
            &env,
            &pool,
            SwapKind::ExactIn,
            zero_for_one,
            from_amount(amount_in)?,
            sqrt_price_limit,
        )?;
        let result = swap_result(&outcome)?;
        if result.amount_out < min_amount_out {
            return Err(PoolError::SlippageExceeded);
        }

        commit_swap(&env, &mut pool, &outcome);
        emit_swap(
            &env,
            pool_id,
            &sender,
            zero_for_one,
            result.amount_in,
            result.amount_out,
            result.fee_amount,
            result.sqrt_price,
            result.current_tick,
        );
        Ok(result)
    }

    /// Receive exactly `amount_out` of `token_out`, paying at most `max_amount_in`
    pub fn swap_exact_out(
        env: Env,
        sender: Address,
        pool_id: u64,
        token_out: Address,
        amount_out: i128,
        max_amount_in: i128,
        sqrt_price_limit: Option<Dec>,
    ) -> Result<SwapResult, PoolError> {
        sender.require_auth();

        if amount_out <= 0 || max_amount_in <= 0 {
            return Err(PoolError::InvalidAmount);
        }

        let mut pool = read_pool(&env, pool_id)?;
        // Paying token0 moves the price down, which is what buying token1 needs
        let zero_for_one = !pool.zero_for_one(&token_out)?;
        accrue_incentives(&env, &mut pool)?;

        let outcome = simulate_swap(
            &env,
            &pool,
            SwapKind::ExactOut,
            zero_for_one,
            from_amount(amount_out)?,
            sqrt_price_limit,
        )?;
        let result = swap_result(&outcome)?;
        if result.amount_in > max_amount_in {
            return Err(PoolError::SlippageExceeded);
        }

        commit_swap(&env, &mut pool, &outcome);
        emit_swap(
            &env,
            pool_id,
            &sender,
            zero_for_one,
            result.amount_in,
            result.amount_out,
            result.fee_amount,
            result.sqrt_price,
            result.current_tick,
        );
        Ok(result)
    }

    // ========================================================
    // LIQUIDITY
    // ========================================================

    /// Add `liquidity` to a position; returns the amounts owed to the pool
    pub fn add_liquidity(
        env: Env,
        owner: Address,
        pool_id: u64,
        lower_tick: i32,
        upper_tick: i32,
        liquidity: u128,
    ) -> Result<(i128, i128), PoolError> {
        owner.require_auth();

        if liquidity == 0 {
            return Err(PoolError::ZeroLiquidity);
        }
        let delta = i128::try_from(liquidity).map_err(|_| PoolError::LiquidityOverflow)?;

        let mut pool = read_pool(&env, pool_id)?;
        let (amount0, amount1) =
            modify_liquidity(&env, &mut pool, &owner, lower_tick, upper_tick, delta)?;
        let (amount0, amount1) = (to_amount(amount0)?, to_amount(amount1)?);

        emit_add_liquidity(&env, pool_id, &owner, lower_tick, upper_tick, liquidity, amount0, amount1);
        Ok((amount0, amount1))
    }

    /// Add the most liquidity the desired amounts can fund at the current price
    pub fn add_liquidity_for_amounts(
        env: Env,
        owner: Address,
        pool_id: u64,
        lower_tick: i32,
        upper_tick: i32,
        amount0_desired: i128,
        amount1_desired: i128,
        amount0_min: i128,
        amount1_min: i128,
    ) -> Result<AddLiquidityResult, PoolError> {
        owner.require_auth();

        let desired0 = from_amount(amount0_desired)?;
        let desired1 = from_amount(amount1_desired)?;
        if amount0_min < 0 || amount1_min < 0 {
            return Err(PoolError::InvalidAmount);
        }

        let mut pool = read_pool(&env, pool_id)?;
        validate_position_params(lower_tick, upper_tick, pool.tick_spacing)?;

        let (price_lower, price_upper) = range_prices(lower_tick, upper_tick)?;
        let liquidity = liquidity_for_amounts(
            pool.sqrt_price,
            price_lower,
            price_upper,
            desired0,
            desired1,
        )?;
        if liquidity == 0 {
            return Err(PoolError::ZeroLiquidity);
        }
        let delta = i128::try_from(liquidity).map_err(|_| PoolError::LiquidityOverflow)?;

        let (expected0, expected1) = amounts_for_liquidity(
            pool.sqrt_price,
            price_lower,
            price_upper,
            liquidity,
            Rounding::Up,
        )?;
        if to_amount(expected0)? < amount0_min || to_amount(expected1)? < amount1_min {
            return Err(PoolError::SlippageExceeded);
        }

        let (amount0, amount1) =
            modify_liquidity(&env, &mut pool, &owner, lower_tick, upper_tick, delta)?;
        let (amount0, amount1) = (to_amount(amount0)?, to_amount(amount1)?);

        emit_add_liquidity(&env, pool_id, &owner, lower_tick, upper_tick, liquidity, amount0, amount1);
        Ok(AddLiquidityResult {
            liquidity,
            amount0,
            amount1,
        })
    }

    /// Remove `liquidity` from a position; returns the amounts released.
    /// Earned fees stay owed until collected.
    pub fn remove_liquidity(
        env: Env,
        owner: Address,
        pool_id: u64,
        lower_tick: i32,
        upper_tick: i32,
        liquidity: u128,
    ) -> Result<(i128, i128), PoolError> {
        owner.require_auth();

        if liquidity == 0 {
            return Err(PoolError::ZeroLiquidity);
        }
        let delta = i128::try_from(liquidity)
            .map_err(|_| PoolError::InsufficientLiquidity)?
            .checked_neg()
            .ok_or(PoolError::InsufficientLiquidity)?;

        let mut pool = read_pool(&env, pool_id)?;
        let (amount0, amount1) =
            modify_liquidity(&env, &mut pool, &owner, lower_tick, upper_tick, delta)?;
        let (amount0, amount1) = (to_amount(amount0)?, to_amount(amount1)?);

        emit_remove_liquidity(&env, pool_id, &owner, lower_tick, upper_tick, liquidity, amount0, amount1);
        Ok((amount0, amount1))
    }

    // ========================================================
    // FEES & INCENTIVES
    // ========================================================

    /// Pay out the whole-unit part of a position's fees
    pub fn collect_fees(
        env: Env,
        owner: Address,
        pool_id: u64,
        lower_tick: i32,
        upper_tick: i32,
    ) -> Result<(i128, i128), PoolError> {
        owner.require_auth();

        let mut pool = read_pool(&env, pool_id)?;
        accrue_incentives(&env, &mut pool)?;
        let mut pos = load_synced_position(&env, &pool, &owner, lower_tick, upper_tick)?;

        let (amount0, amount1) = pay_out_fees(&mut pos)?;
        let (amount0, amount1) = (to_amount(amount0)?, to_amount(amount1)?);

        write_pool(&env, &pool);
        save_position(&env, pool_id, &owner, lower_tick, upper_tick, &pos);

        emit_collect(&env, pool_id, &owner, lower_tick, upper_tick, amount0, amount1);
        Ok((amount0, amount1))
    }

    /// Fund a reward stream for in-range liquidity; returns the track index
    pub fn create_incentive(
        env: Env,
        sender: Address,
        pool_id: u64,
        reward_token: Address,
        amount: i128,
        emission_rate: Dec,
    ) -> Result<u32, PoolError> {
        sender.require_auth();

        if amount <= 0 {
            return Err(PoolError::InvalidAmount);
        }

        let params = read_params(&env)?;
        let mut pool = read_pool(&env, pool_id)?;
        accrue_incentives(&env, &mut pool)?;

        let index = add_track(
            &mut pool,
            &reward_token,
            amount as u128,
            emission_rate,
            params.max_incentive_tracks,
        )?;
        write_pool(&env, &pool);

        emit_incentive_created(&env, pool_id, &sender, index, &reward_token, amount, emission_rate);
        Ok(index)
    }

    /// Pay out the whole-unit part of every incentive a position earned, in track order
    pub fn collect_incentives(
        env: Env,
        owner: Address,
        pool_id: u64,
        lower_tick: i32,
        upper_tick: i32,
    ) -> Result<Vec<i128>, PoolError> {
        owner.require_auth();

        let mut pool = read_pool(&env, pool_id)?;
        accrue_incentives(&env, &mut pool)?;
        let mut pos = load_synced_position(&env, &pool, &owner, lower_tick, upper_tick)?;

        let mut amounts = Vec::new(&env);
        for amount in pay_out_incentives(&mut pos)?.iter() {
            amounts.push_back(to_amount(amount)?);
        }

        write_pool(&env, &pool);
        save_position(&env, pool_id, &owner, lower_tick, upper_tick, &pos);

        emit_collect_incentives(&env, pool_id, &owner, lower_tick, upper_tick, &amounts);
        Ok(amounts)
    }

    // ========================================================
    // VIEW FUNCTIONS
    // ========================================================

    pub fn get_params(env: Env) -> Result<Params, PoolError> {
        read_params(&env)
    }

    pub fn get_pool(env: Env, pool_id: u64) -> Result<PoolState, PoolError> {
        read_pool(&env, pool_id)
    }

    /// Pools in id order after `start_after`, at most `MAX_PAGE_LIMIT` per page
    pub fn list_pools(env: Env, start_after: Option<u64>, limit: u32) -> Vec<PoolState> {
        let limit = limit.min(MAX_PAGE_LIMIT);
        let next_id = read_next_pool_id(&env);

        let mut pools = Vec::new(&env);
        let mut id = start_after.map_or(1, |after| after.saturating_add(1));
        while id < next_id && pools.len() < limit {
            if let Ok(pool) = read_pool(&env, id) {
                pools.push_back(pool);
            }
            id += 1;
        }
        pools
    }

    pub fn get_tick_info(env: Env, pool_id: u64, tick: i32) -> Result<TickInfo, PoolError> {
        read_pool(&env, pool_id)?;
        PoolTicks::new(&env, pool_id)
            .read_tick(tick)
            .ok_or(PoolError::TickNotFound)
    }

    /// Initialized ticks at or above `start_tick`, ascending
    pub fn list_initialized_ticks(
        env: Env,
        pool_id: u64,
        start_tick: i32,
        limit: u32,
    ) -> Result<Vec<TickEntry>, PoolError> {
        let pool = read_pool(&env, pool_id)?;
        let limit = limit.min(MAX_PAGE_LIMIT);
        let ticks = PoolTicks::new(&env, pool_id);
        let bitmap = PoolBitmap::new(&env, pool_id);

        let mut entries = Vec::new(&env);
        let mut cursor = start_tick.saturating_sub(1);
        while entries.len() < limit {
            let Some(tick) = next_initialized_tick(&bitmap, cursor, pool.tick_spacing, false) else {
                break;
            };
            let info = ticks.read_tick(tick).ok_or(PoolError::InvariantViolation)?;
            entries.push_back(TickEntry { tick, info });
            cursor = tick;
        }
        Ok(entries)
    }

    /// Position with amounts and owed balances as of now
    pub fn get_position(
        env: Env,
        owner: Address,
        pool_id: u64,
        lower_tick: i32,
        upper_tick: i32,
    ) -> Result<PositionInfo, PoolError> {
        let pool = read_pool(&env, pool_id)?;
        position_info(&env, &pool, &owner, lower_tick, upper_tick)
    }

    /// Result of `swap_exact_in` without executing it
    pub fn quote_swap_exact_in(
        env: Env,
        pool_id: u64,
        token_in: Address,
        amount_in: i128,
        sqrt_price_limit: Option<Dec>,
    ) -> Result<SwapResult, PoolError> {
        if amount_in <= 0 {
            return Err(PoolError::InvalidAmount);
        }

        let mut pool = read_pool(&env, pool_id)?;
        let zero_for_one = pool.zero_for_one(&token_in)?;
        accrue_incentives(&env, &mut pool)?;

        let outcome = simulate_swap(
            &env,
            &pool,
            SwapKind::ExactIn,
            zero_for_one,
            from_amount(amount_in)?,
            sqrt_price_limit,
        )?;
        swap_result(&outcome)
    }
}
