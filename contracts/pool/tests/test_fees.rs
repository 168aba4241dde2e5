mod common;

use cl_pool::PoolError;
use common::LIQUIDITY;
use soroban_sdk::{testutils::Address as _, Address, Env};

#[test]
fn test_collect_fees_after_swap() {
    let env = Env::default();
    let (client, pool_id, token0, _) = common::setup_pool(&env);
    let lp = Address::generate(&env);
    let trader = Address::generate(&env);
    client.add_liquidity(&lp, &pool_id, &-100, &100, &LIQUIDITY);
    client.swap_exact_in(&trader, &pool_id, &token0, &1_000_000, &0, &None);

    assert_eq!(client.collect_fees(&lp, &pool_id, &-100, &100), (3_000, 0));
    assert_eq!(client.collect_fees(&lp, &pool_id, &-100, &100), (0, 0));

    let position = client.get_position(&lp, &pool_id, &-100, &100);
    assert_eq!(position.liquidity, LIQUIDITY);
    assert_eq!(position.fees_owed_0, 0);
}

#[test]
fn test_fees_split_by_liquidity_share() {
    let env = Env::default();
    let (client, pool_id, token0, _) = common::setup_pool(&env);
    let big = Address::generate(&env);
    let small = Address::generate(&env);
    let trader = Address::generate(&env);
    client.add_liquidity(&big, &pool_id, &-100, &100, &(2 * LIQUIDITY));
    client.add_liquidity(&small, &pool_id, &-100, &100, &LIQUIDITY);

    // 3000 fee over 3e12 liquidity
    let result = client.swap_exact_in(&trader, &pool_id, &token0, &1_000_000, &0, &None);
    assert_eq!(result.fee_amount, 3_000);

    assert_eq!(client.collect_fees(&big, &pool_id, &-100, &100), (2_000, 0));
    assert_eq!(client.collect_fees(&small, &pool_id, &-100, &100), (1_000, 0));
}

#[test]
fn test_fees_survive_removal_until_collected() {
    let env = Env::default();
    let (client, pool_id, token0, _) = common::setup_pool(&env);
    let lp = Address::generate(&env);
    let trader = Address::generate(&env);
    client.add_liquidity(&lp, &pool_id, &-100, &100, &LIQUIDITY);
    client.swap_exact_in(&trader, &pool_id, &token0, &1_000_000, &0, &None);

    client.remove_liquidity(&lp, &pool_id, &-100, &100, &LIQUIDITY);
    let position = client.get_position(&lp, &pool_id, &-100, &100);
    assert_eq!(position.liquidity, 0);
    assert_eq!(position.fees_owed_0, 3_000);

    assert_eq!(client.collect_fees(&lp, &pool_id, &-100, &100), (3_000, 0));
    assert_eq!(
        client.try_get_position(&lp, &pool_id, &-100, &100),
        Err(Ok(PoolError::PositionNotFound))
    );
}

#[test]
fn test_out_of_range_position_earns_nothing() {
    let env = Env::default();
    let (client, pool_id, token0, _) = common::setup_pool(&env);
    let active = Address::generate(&env);
    let idle = Address::generate(&env);
    let trader = Address::generate(&env);
    client.add_liquidity(&active, &pool_id, &-100, &100, &LIQUIDITY);
    client.add_liquidity(&idle, &pool_id, &100, &200, &LIQUIDITY);

    client.swap_exact_in(&trader, &pool_id, &token0, &1_000_000, &0, &None);

    assert_eq!(client.collect_fees(&idle, &pool_id, &100, &200), (0, 0));
    assert_eq!(client.collect_fees(&active, &pool_id, &-100, &100), (3_000, 0));
}

#[test]
fn test_late_position_does_not_earn_earlier_fees() {
    let env = Env::default();
    let (client, pool_id, token0, _) = common::setup_pool(&env);
    let early = Address::generate(&env);
    let late = Address::generate(&env);
    let trader = Address::generate(&env);
    client.add_liquidity(&early, &pool_id, &-100, &100, &LIQUIDITY);
    client.swap_exact_in(&trader, &pool_id, &token0, &1_000_000, &0, &None);

    client.add_liquidity(&late, &pool_id, &-100, &100, &LIQUIDITY);
    assert_eq!(client.get_position(&late, &pool_id, &-100, &100).fees_owed_0, 0);
    assert_eq!(client.get_position(&early, &pool_id, &-100, &100).fees_owed_0, 3_000);
}

#[test]
fn test_full_removal_of_late_position_pays_no_earlier_fees() {
    let env = Env::default();
    let (client, pool_id, token0, _) = common::setup_pool(&env);
    let early = Address::generate(&env);
    let late = Address::generate(&env);
    let trader = Address::generate(&env);
    client.add_liquidity(&early, &pool_id, &-100, &100, &LIQUIDITY);
    client.swap_exact_in(&trader, &pool_id, &token0, &1_000_000, &0, &None);

    // Fresh ticks inside the active range, cleared again by the removal
    client.add_liquidity(&late, &pool_id, &-50, &50, &LIQUIDITY);
    client.remove_liquidity(&late, &pool_id, &-50, &50, &LIQUIDITY);

    assert_eq!(
        client.try_get_position(&late, &pool_id, &-50, &50),
        Err(Ok(PoolError::PositionNotFound))
    );
    assert_eq!(
        client.try_get_tick_info(&pool_id, &-50),
        Err(Ok(PoolError::TickNotFound))
    );
    assert_eq!(client.collect_fees(&early, &pool_id, &-100, &100), (3_000, 0));
}

#[test]
fn test_full_removal_keeps_only_fees_earned_in_range() {
    let env = Env::default();
    let (client, pool_id, token0, token1) = common::setup_pool(&env);
    let early = Address::generate(&env);
    let late = Address::generate(&env);
    let trader = Address::generate(&env);
    client.add_liquidity(&early, &pool_id, &-100, &100, &LIQUIDITY);
    client.swap_exact_in(&trader, &pool_id, &token0, &1_000_000, &0, &None);

    client.add_liquidity(&late, &pool_id, &-50, &50, &LIQUIDITY);
    let result = client.swap_exact_in(&trader, &pool_id, &token1, &1_000_000, &0, &None);
    assert_eq!(result.fee_amount, 3_000);
    assert_eq!(result.ticks_crossed, 0);

    client.remove_liquidity(&late, &pool_id, &-50, &50, &LIQUIDITY);
    assert_eq!(client.collect_fees(&late, &pool_id, &-50, &50), (0, 1_500));
    assert_eq!(client.collect_fees(&early, &pool_id, &-100, &100), (3_000, 1_500));
}

#[test]
fn test_collect_from_missing_position_fails() {
    let env = Env::default();
    let (client, pool_id, _, _) = common::setup_pool(&env);
    let lp = Address::generate(&env);

    let result = client.try_collect_fees(&lp, &pool_id, &-100, &100);
    assert_eq!(result, Err(Ok(PoolError::PositionNotFound)));
}
