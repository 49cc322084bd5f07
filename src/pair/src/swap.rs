use soroban_sdk::{log, token, Address, Env, U256};

use crate::constants::{FEE_DENOMINATOR, FEE_NUMERATOR, MAX_RESERVE};
use crate::errors::PairError;
use crate::events;
use crate::math::{self, mul_div_i128, signed, unsigned};
use crate::reserves;
use crate::storage;

/// Exact-in output of the fee-adjusted constant product curve, rounded down.
pub fn get_amount_out(
    env: &Env,
    amount_in: i128,
    reserve_in: i128,
    reserve_out: i128,
) -> Result<i128, PairError> {
    if amount_in <= 0 {
        return Err(PairError::InsufficientInputAmount);
    }
    if reserve_in <= 0 || reserve_out <= 0 {
        return Err(PairError::InsufficientLiquidity);
    }

    let amount_in_with_fee = unsigned(amount_in)?
        .checked_mul(FEE_DENOMINATOR - FEE_NUMERATOR)
        .ok_or(PairError::Overflow)?;
    let denominator = (reserve_in as u128)
        .checked_mul(FEE_DENOMINATOR)
        .and_then(|scaled| scaled.checked_add(amount_in_with_fee))
        .ok_or(PairError::Overflow)?;
    let amount_out = math::mul_div(env, amount_in_with_fee, reserve_out as u128, denominator)
        .ok_or(PairError::Overflow)?;
    signed(amount_out)
}

/// Amount of B equal in value to `amount_a` at the current reserve ratio.
pub fn quote(env: &Env, amount_a: i128, reserve_a: i128, reserve_b: i128) -> Result<i128, PairError> {
    if amount_a <= 0 {
        return Err(PairError::InvalidAmount);
    }
    if reserve_a <= 0 || reserve_b <= 0 {
        return Err(PairError::InsufficientLiquidity);
    }
    mul_div_i128(env, amount_a, reserve_b, reserve_a)
}

/// Sends the requested outputs to `to`, then checks that the inputs already
/// present in the pair keep the fee-adjusted product at or above the old one.
pub fn swap(
    env: &Env,
    amount_0_out: i128,
    amount_1_out: i128,
    to: &Address,
) -> Result<(), PairError> {
    if amount_0_out < 0 || amount_1_out < 0 {
        return Err(PairError::InvalidAmount);
    }
    if amount_0_out == 0 && amount_1_out == 0 {
        return Err(PairError::InsufficientOutputAmount);
    }

    let mut pair = storage::read_pair(env)?;
    if amount_0_out >= pair.reserve_0 || amount_1_out >= pair.reserve_1 {
        return Err(PairError::InsufficientLiquidity);
    }
    if pair.has_token(to) {
        return Err(PairError::InvalidTo);
    }

    let this = env.current_contract_address();
    if amount_0_out > 0 {
        token::Client::new(env, &pair.token_0).transfer(&this, to, &amount_0_out);
    }
    if amount_1_out > 0 {
        token::Client::new(env, &pair.token_1).transfer(&this, to, &amount_1_out);
    }

    let (balance_0, balance_1) = reserves::token_balances(env, &pair);
    if balance_0 > MAX_RESERVE || balance_1 > MAX_RESERVE {
        return Err(PairError::Overflow);
    }
    let amount_0_in = (balance_0 - (pair.reserve_0 - amount_0_out)).max(0);
    let amount_1_in = (balance_1 - (pair.reserve_1 - amount_1_out)).max(0);
    if amount_0_in == 0 && amount_1_in == 0 {
        return Err(PairError::InsufficientInputAmount);
    }

    // (balance * 1000 - amount_in * 3) for each side; balances < 2^112 so the
    // scaled values fit in u128 and their product in 256 bits
    let adjusted_0 = balance_0 as u128 * FEE_DENOMINATOR - amount_0_in as u128 * FEE_NUMERATOR;
    let adjusted_1 = balance_1 as u128 * FEE_DENOMINATOR - amount_1_in as u128 * FEE_NUMERATOR;
    let k_after = math::full_mul(env, adjusted_0, adjusted_1);
    let k_before = math::full_mul(env, pair.reserve_0 as u128, pair.reserve_1 as u128)
        .mul(&U256::from_u128(env, FEE_DENOMINATOR * FEE_DENOMINATOR));
    if k_after < k_before {
        log!(env, "k decreased", balance_0, balance_1, pair.reserve_0, pair.reserve_1);
        return Err(PairError::InvariantViolation);
    }

    reserves::update(env, &mut pair, balance_0, balance_1)?;
    storage::write_pair(env, &pair);

    events::Swap {
        to: to.clone(),
        amount_0_in,
        amount_1_in,
        amount_0_out,
        amount_1_out,
    }
    .publish(env);
    Ok(())
}
