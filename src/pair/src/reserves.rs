use soroban_sdk::{token, Address, Env};

use crate::constants::MAX_RESERVE;
use crate::errors::PairError;
use crate::events;
use crate::fixed_point::{accumulate, Uq112x112};
use crate::storage::PairStorage;

/// Ledger timestamp truncated to 32 bits. Elapsed time is computed with
/// wrapping subtraction, so the truncation is invisible to the oracle.
pub fn block_timestamp(env: &Env) -> u32 {
    (env.ledger().timestamp() % (1u64 << 32)) as u32
}

/// Actual token balances held by the pair.
pub fn token_balances(env: &Env, pair: &PairStorage) -> (i128, i128) {
    let this = env.current_contract_address();
    let balance_0 = token::Client::new(env, &pair.token_0).balance(&this);
    let balance_1 = token::Client::new(env, &pair.token_1).balance(&this);
    (balance_0, balance_1)
}

/// Advances the price accumulators using the previous reserves, then
/// records the new balances as reserves.
pub fn update(
    env: &Env,
    pair: &mut PairStorage,
    balance_0: i128,
    balance_1: i128,
) -> Result<(), PairError> {
    if !(0..=MAX_RESERVE).contains(&balance_0) || !(0..=MAX_RESERVE).contains(&balance_1) {
        return Err(PairError::Overflow);
    }

    let now = block_timestamp(env);
    let elapsed = now.wrapping_sub(pair.block_timestamp_last);
    if elapsed > 0 && pair.reserve_0 != 0 && pair.reserve_1 != 0 {
        let reserve_0 = pair.reserve_0 as u128;
        let reserve_1 = pair.reserve_1 as u128;
        if let (Some(price_0), Some(price_1)) = (
            Uq112x112::fraction(env, reserve_1, reserve_0),
            Uq112x112::fraction(env, reserve_0, reserve_1),
        ) {
            pair.price_0_cumulative_last =
                accumulate(env, &pair.price_0_cumulative_last, &price_0, elapsed);
            pair.price_1_cumulative_last =
                accumulate(env, &pair.price_1_cumulative_last, &price_1, elapsed);
        }
    }

    pair.reserve_0 = balance_0;
    pair.reserve_1 = balance_1;
    pair.block_timestamp_last = now;

    events::Sync {
        reserve_0: balance_0,
        reserve_1: balance_1,
    }
    .publish(env);
    Ok(())
}

/// Forces reserves to match balances.
pub fn sync(env: &Env, pair: &mut PairStorage) -> Result<(), PairError> {
    let (balance_0, balance_1) = token_balances(env, pair);
    update(env, pair, balance_0, balance_1)
}

/// Sends any balance above the reserves to `to`. Reserves are untouched.
pub fn skim(env: &Env, pair: &PairStorage, to: &Address) -> (i128, i128) {
    let this = env.current_contract_address();
    let (balance_0, balance_1) = token_balances(env, pair);
    let excess_0 = (balance_0 - pair.reserve_0).max(0);
    let excess_1 = (balance_1 - pair.reserve_1).max(0);
    if excess_0 > 0 {
        token::Client::new(env, &pair.token_0).transfer(&this, to, &excess_0);
    }
    if excess_1 > 0 {
        token::Client::new(env, &pair.token_1).transfer(&this, to, &excess_1);
    }
    (excess_0, excess_1)
}
