use cl_math::{Dec, Rounding};
use soroban_sdk::Vec;

use crate::error::PositionError;
use crate::types::Position;

/// Split an owed amount into its whole-unit payout and the fraction left behind
fn take_whole(owed: Dec) -> Result<(u128, Dec), PositionError> {
    let whole = owed.to_int(Rounding::Down)?;
    let rest = owed.checked_sub(Dec::from_int(whole))?;
    Ok((whole, rest))
}

/// Pay out the whole-unit part of both fee balances
pub fn collect_fees(pos: &mut Position) -> Result<(u128, u128), PositionError> {
    let (amount0, rest0) = take_whole(pos.tokens_owed_0)?;
    let (amount1, rest1) = take_whole(pos.tokens_owed_1)?;
    pos.tokens_owed_0 = rest0;
    pos.tokens_owed_1 = rest1;
    Ok((amount0, amount1))
}

/// Pay out the whole-unit part of every incentive balance, in track order
pub fn collect_incentives(pos: &mut Position) -> Result<Vec<u128>, PositionError> {
    let env = pos.incentives_owed.env().clone();
    let mut payouts = Vec::new(&env);
    let mut rests = Vec::new(&env);
    for owed in pos.incentives_owed.iter() {
        let (whole, rest) = take_whole(owed)?;
        payouts.push_back(whole);
        rests.push_back(rest);
    }
    pos.incentives_owed = rests;
    Ok(payouts)
}
