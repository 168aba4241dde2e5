mod common;

use cl_math::{Dec, MAX_PAGE_LIMIT, MAX_TICK, MIN_TICK};
use cl_pool::PoolError;
use common::LIQUIDITY;
use soroban_sdk::{testutils::Address as _, Address, Env};

// ============================================================
// POOL LISTING
// ============================================================

#[test]
fn test_list_pools_paginates() {
    let env = Env::default();
    let (client, _admin) = common::setup(&env);
    let creator = Address::generate(&env);
    for _ in 0..5 {
        let (token0, token1) = common::token_pair(&env);
        client.create_pool(&creator, &token0, &token1, &10, &Dec::ZERO, &Dec::ONE);
    }

    let first = client.list_pools(&None, &2);
    assert_eq!(first.len(), 2);
    assert_eq!(first.get(0).unwrap().id, 1);
    assert_eq!(first.get(1).unwrap().id, 2);

    let rest = client.list_pools(&Some(2), &10);
    assert_eq!(rest.len(), 3);
    assert_eq!(rest.get(0).unwrap().id, 3);
    assert_eq!(rest.get(2).unwrap().id, 5);

    assert!(client.list_pools(&Some(5), &10).is_empty());
    assert!(client.list_pools(&None, &0).is_empty());
}

#[test]
fn test_list_pools_caps_limit() {
    let env = Env::default();
    let (client, _admin) = common::setup(&env);
    let creator = Address::generate(&env);
    for _ in 0..(MAX_PAGE_LIMIT + 3) {
        let (token0, token1) = common::token_pair(&env);
        client.create_pool(&creator, &token0, &token1, &1, &Dec::ZERO, &Dec::ONE);
    }

    assert_eq!(client.list_pools(&None, &u32::MAX).len(), MAX_PAGE_LIMIT);
    assert_eq!(client.list_pools(&Some(MAX_PAGE_LIMIT as u64), &u32::MAX).len(), 3);
}

// ============================================================
// TICKS
// ============================================================

#[test]
fn test_list_initialized_ticks() {
    let env = Env::default();
    let (client, pool_id, _, _) =
        common::setup_custom_pool(&env, 10, common::spread_30bps(), Dec::ONE);
    let lp = Address::generate(&env);
    client.add_liquidity(&lp, &pool_id, &-1_000, &1_000, &LIQUIDITY);
    client.add_liquidity(&lp, &pool_id, &-10, &20, &LIQUIDITY);
    client.add_liquidity(&lp, &pool_id, &(MIN_TICK / 10 * 10), &(MAX_TICK / 10 * 10), &LIQUIDITY);

    let all = client.list_initialized_ticks(&pool_id, &MIN_TICK, &100);
    let ticks: std::vec::Vec<i32> = all.iter().map(|entry| entry.tick).collect();
    assert_eq!(
        ticks,
        std::vec![MIN_TICK / 10 * 10, -1_000, -10, 20, 1_000, MAX_TICK / 10 * 10]
    );

    let entry = all.get(2).unwrap();
    assert_eq!(entry.info.liquidity_gross, LIQUIDITY);
    assert_eq!(entry.info.liquidity_net, LIQUIDITY as i128);

    // Starting point is inclusive
    let page = client.list_initialized_ticks(&pool_id, &-10, &2);
    assert_eq!(page.len(), 2);
    assert_eq!(page.get(0).unwrap().tick, -10);
    assert_eq!(page.get(1).unwrap().tick, 20);

    let page = client.list_initialized_ticks(&pool_id, &21, &100);
    assert_eq!(page.len(), 2);
    assert_eq!(page.get(0).unwrap().tick, 1_000);
}

#[test]
fn test_get_tick_info_errors() {
    let env = Env::default();
    let (client, pool_id, _, _) = common::setup_pool(&env);

    assert_eq!(client.try_get_tick_info(&pool_id, &5), Err(Ok(PoolError::TickNotFound)));
    assert_eq!(client.try_get_tick_info(&99, &5), Err(Ok(PoolError::PoolNotFound)));
    assert_eq!(
        client.try_list_initialized_ticks(&99, &0, &10),
        Err(Ok(PoolError::PoolNotFound))
    );
}

// ============================================================
// POSITIONS
// ============================================================

#[test]
fn test_positions_are_per_owner_and_range() {
    let env = Env::default();
    let (client, pool_id, _, _) = common::setup_pool(&env);
    let a = Address::generate(&env);
    let b = Address::generate(&env);

    client.add_liquidity(&a, &pool_id, &-100, &100, &LIQUIDITY);
    client.add_liquidity(&a, &pool_id, &-50, &100, &(2 * LIQUIDITY));
    client.add_liquidity(&b, &pool_id, &-100, &100, &(3 * LIQUIDITY));

    assert_eq!(client.get_position(&a, &pool_id, &-100, &100).liquidity, LIQUIDITY);
    assert_eq!(client.get_position(&a, &pool_id, &-50, &100).liquidity, 2 * LIQUIDITY);
    assert_eq!(client.get_position(&b, &pool_id, &-100, &100).liquidity, 3 * LIQUIDITY);
    assert_eq!(
        client.try_get_position(&b, &pool_id, &-50, &100),
        Err(Ok(PoolError::PositionNotFound))
    );
}
