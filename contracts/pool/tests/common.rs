#![allow(dead_code)]

use cl_math::{tick_to_sqrt_price, Dec, Rounding, MIN_TICK};
use cl_pool::types::Params;
use cl_pool::{ClPool, ClPoolClient};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env};

// Test constants
pub const DEFAULT_TICK_SPACING: u32 = 1;
pub const LIQUIDITY: u128 = 1_000_000_000_000;

/// 0.3%
pub fn spread_30bps() -> Dec {
    Dec::from_ratio(3, 1_000, Rounding::Down).unwrap()
}

pub fn price(tick: i32) -> Dec {
    tick_to_sqrt_price(tick).unwrap()
}

/// Register and initialize the contract with default parameters
pub fn setup(env: &Env) -> (ClPoolClient<'_>, Address) {
    env.mock_all_auths();

    let admin = Address::generate(env);
    let contract_id = env.register(ClPool, ());
    let client = ClPoolClient::new(env, &contract_id);
    client.initialize(&admin, &Params::default_for(env));

    (client, admin)
}

/// Two distinct token addresses, sorted
pub fn token_pair(env: &Env) -> (Address, Address) {
    let a = Address::generate(env);
    let b = Address::generate(env);
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Pool at price 1.0 (tick 0) with spacing 1 and a 0.3% spread factor
pub fn setup_pool(env: &Env) -> (ClPoolClient<'_>, u64, Address, Address) {
    setup_custom_pool(env, DEFAULT_TICK_SPACING, spread_30bps(), Dec::ONE)
}

pub fn setup_custom_pool(
    env: &Env,
    tick_spacing: u32,
    spread_factor: Dec,
    initial_price: Dec,
) -> (ClPoolClient<'_>, u64, Address, Address) {
    let (client, _admin) = setup(env);
    let (token0, token1) = token_pair(env);
    let creator = Address::generate(env);
    let pool_id = client.create_pool(
        &creator,
        &token0,
        &token1,
        &tick_spacing,
        &spread_factor,
        &initial_price,
    );
    (client, pool_id, token0, token1)
}

/// Move ledger time forward
pub fn advance_time(env: &Env, seconds: u64) {
    env.ledger().with_mut(|li| li.timestamp += seconds);
}

/// Sum of net liquidity over initialized ticks at or below `current_tick`
pub fn active_liquidity_from_ticks(client: &ClPoolClient<'_>, pool_id: u64) -> u128 {
    let pool = client.get_pool(&pool_id);
    let mut total: i128 = 0;
    for entry in client.list_initialized_ticks(&pool_id, &MIN_TICK, &100).iter() {
        if entry.tick <= pool.current_tick {
            total += entry.info.liquidity_net;
        }
    }
    assert!(total >= 0);
    total as u128
}
