// Pool events
//
// Topics are (name, pool_id) so indexers can filter per pool; module-wide
// events carry the name only.

use cl_math::Dec;
use soroban_sdk::{symbol_short, Address, Env, Vec};

use crate::types::Params;

/// Topics: ("params",)
/// Data: (authorized_tick_spacings, authorized_spread_factors, max_incentive_tracks)
pub fn emit_params(env: &Env, params: &Params) {
    env.events().publish(
        (symbol_short!("params"),),
        (
            params.authorized_tick_spacings.clone(),
            params.authorized_spread_factors.clone(),
            params.max_incentive_tracks,
        ),
    );
}

/// Topics: ("pool_new", pool_id)
/// Data: (creator, token0, token1, tick_spacing, spread_factor, sqrt_price, current_tick)
pub fn emit_pool_created(
    env: &Env,
    pool_id: u64,
    creator: &Address,
    token0: &Address,
    token1: &Address,
    tick_spacing: u32,
    spread_factor: Dec,
    sqrt_price: Dec,
    current_tick: i32,
) {
    env.events().publish(
        (symbol_short!("pool_new"), pool_id),
        (
            creator.clone(),
            token0.clone(),
            token1.clone(),
            tick_spacing,
            spread_factor,
            sqrt_price,
            current_tick,
        ),
    );
}

/// Topics: ("swap", pool_id)
/// Data: (sender, zero_for_one, amount_in, amount_out, fee_amount, sqrt_price, current_tick)
pub fn emit_swap(
    env: &Env,
    pool_id: u64,
    sender: &Address,
    zero_for_one: bool,
    amount_in: i128,
    amount_out: i128,
    fee_amount: i128,
    sqrt_price: Dec,
    current_tick: i32,
) {
    env.events().publish(
        (symbol_short!("swap"), pool_id),
        (
            sender.clone(),
            zero_for_one,
            amount_in,
            amount_out,
            fee_amount,
            sqrt_price,
            current_tick,
        ),
    );
}

/// Topics: ("add_liq", pool_id)
/// Data: (owner, lower_tick, upper_tick, liquidity, amount0, amount1)
pub fn emit_add_liquidity(
    env: &Env,
    pool_id: u64,
    owner: &Address,
    lower_tick: i32,
    upper_tick: i32,
    liquidity: u128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (symbol_short!("add_liq"), pool_id),
        (owner.clone(), lower_tick, upper_tick, liquidity, amount0, amount1),
    );
}

/// Topics: ("rem_liq", pool_id)
/// Data: (owner, lower_tick, upper_tick, liquidity, amount0, amount1)
pub fn emit_remove_liquidity(
    env: &Env,
    pool_id: u64,
    owner: &Address,
    lower_tick: i32,
    upper_tick: i32,
    liquidity: u128,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (symbol_short!("rem_liq"), pool_id),
        (owner.clone(), lower_tick, upper_tick, liquidity, amount0, amount1),
    );
}

/// Topics: ("collect", pool_id)
/// Data: (owner, lower_tick, upper_tick, amount0, amount1)
pub fn emit_collect(
    env: &Env,
    pool_id: u64,
    owner: &Address,
    lower_tick: i32,
    upper_tick: i32,
    amount0: i128,
    amount1: i128,
) {
    env.events().publish(
        (symbol_short!("collect"), pool_id),
        (owner.clone(), lower_tick, upper_tick, amount0, amount1),
    );
}

/// Topics: ("coll_inc", pool_id)
/// Data: (owner, lower_tick, upper_tick, amounts)
pub fn emit_collect_incentives(
    env: &Env,
    pool_id: u64,
    owner: &Address,
    lower_tick: i32,
    upper_tick: i32,
    amounts: &Vec<i128>,
) {
    env.events().publish(
        (symbol_short!("coll_inc"), pool_id),
        (owner.clone(), lower_tick, upper_tick, amounts.clone()),
    );
}

/// Topics: ("inc_new", pool_id)
/// Data: (sender, index, reward_token, amount, emission_rate)
pub fn emit_incentive_created(
    env: &Env,
    pool_id: u64,
    sender: &Address,
    index: u32,
    reward_token: &Address,
    amount: i128,
    emission_rate: Dec,
) {
    env.events().publish(
        (symbol_short!("inc_new"), pool_id),
        (sender.clone(), index, reward_token.clone(), amount, emission_rate),
    );
}
