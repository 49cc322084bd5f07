//! Slippage-bounded liquidity and swap calls on top of the pair primitives.
//!
//! Callers name tokens in their own order (A/B, in/out); these helpers map
//! them onto the pair's sorted token_0/token_1 and back.

use soroban_sdk::{token, Address, Env};

use crate::errors::PairError;
use crate::liquidity;
use crate::storage::{self, PairStorage};
use crate::swap::{self, get_amount_out, quote};

/// Whether `token_a` is the pair's token_0. Fails for foreign or identical tokens.
fn a_is_token_0(pair: &PairStorage, token_a: &Address, token_b: &Address) -> Result<bool, PairError> {
    if token_a == token_b {
        return Err(PairError::IdenticalTokens);
    }
    if !pair.has_token(token_a) || !pair.has_token(token_b) {
        return Err(PairError::UnsupportedToken);
    }
    Ok(token_a == &pair.token_0)
}

fn ordered<T>(a_is_0: bool, a: T, b: T) -> (T, T) {
    if a_is_0 {
        (a, b)
    } else {
        (b, a)
    }
}

/// Picks the deposit closest to the desired amounts that matches the reserve ratio.
pub fn optimal_amounts(
    env: &Env,
    reserve_a: i128,
    reserve_b: i128,
    amount_a_desired: i128,
    amount_b_desired: i128,
    amount_a_min: i128,
    amount_b_min: i128,
) -> Result<(i128, i128), PairError> {
    let (amount_a, amount_b) = if reserve_a == 0 && reserve_b == 0 {
        (amount_a_desired, amount_b_desired)
    } else {
        let amount_b_optimal = quote(env, amount_a_desired, reserve_a, reserve_b)?;
        if amount_b_optimal <= amount_b_desired {
            (amount_a_desired, amount_b_optimal)
        } else {
            let amount_a_optimal = quote(env, amount_b_desired, reserve_b, reserve_a)?;
            (amount_a_optimal.min(amount_a_desired), amount_b_desired)
        }
    };

    if amount_a < amount_a_min {
        return Err(PairError::InsufficientAAmount);
    }
    if amount_b < amount_b_min {
        return Err(PairError::InsufficientBAmount);
    }
    Ok((amount_a, amount_b))
}

#[allow(clippy::too_many_arguments)]
pub fn add_liquidity(
    env: &Env,
    sender: &Address,
    token_a: &Address,
    token_b: &Address,
    amount_a_desired: i128,
    amount_b_desired: i128,
    amount_a_min: i128,
    amount_b_min: i128,
    to: &Address,
) -> Result<(i128, i128, i128), PairError> {
    if amount_a_desired <= 0 || amount_b_desired <= 0 || amount_a_min < 0 || amount_b_min < 0 {
        return Err(PairError::InvalidAmount);
    }
    let pair = storage::read_pair(env)?;
    let a_is_0 = a_is_token_0(&pair, token_a, token_b)?;
    let (reserve_a, reserve_b) = ordered(a_is_0, pair.reserve_0, pair.reserve_1);

    let (amount_a, amount_b) = optimal_amounts(
        env,
        reserve_a,
        reserve_b,
        amount_a_desired,
        amount_b_desired,
        amount_a_min,
        amount_b_min,
    )?;

    let this = env.current_contract_address();
    token::Client::new(env, token_a).transfer(sender, &this, &amount_a);
    token::Client::new(env, token_b).transfer(sender, &this, &amount_b);
    let liquidity = liquidity::mint(env, to)?;
    Ok((amount_a, amount_b, liquidity))
}

#[allow(clippy::too_many_arguments)]
pub fn remove_liquidity(
    env: &Env,
    sender: &Address,
    token_a: &Address,
    token_b: &Address,
    liquidity: i128,
    amount_a_min: i128,
    amount_b_min: i128,
    to: &Address,
) -> Result<(i128, i128), PairError> {
    if liquidity <= 0 || amount_a_min < 0 || amount_b_min < 0 {
        return Err(PairError::InvalidAmount);
    }
    let pair = storage::read_pair(env)?;
    let a_is_0 = a_is_token_0(&pair, token_a, token_b)?;

    liquidity::move_shares(env, sender, &env.current_contract_address(), liquidity)?;
    let (amount_0, amount_1) = liquidity::burn(env, to)?;
    let (amount_a, amount_b) = ordered(a_is_0, amount_0, amount_1);

    if amount_a < amount_a_min {
        return Err(PairError::InsufficientAAmount);
    }
    if amount_b < amount_b_min {
        return Err(PairError::InsufficientBAmount);
    }
    Ok((amount_a, amount_b))
}

/// Output for `amount_in` of `token_in` at the current reserves.
pub fn amount_out_for(
    env: &Env,
    pair: &PairStorage,
    amount_in: i128,
    token_in: &Address,
) -> Result<i128, PairError> {
    let reserve_in = pair.reserve_of(token_in).ok_or(PairError::UnsupportedToken)?;
    let reserve_out = if token_in == &pair.token_0 {
        pair.reserve_1
    } else {
        pair.reserve_0
    };
    get_amount_out(env, amount_in, reserve_in, reserve_out)
}

#[allow(clippy::too_many_arguments)]
pub fn swap_exact_tokens_for_tokens(
    env: &Env,
    sender: &Address,
    amount_in: i128,
    amount_out_min: i128,
    token_in: &Address,
    token_out: &Address,
    to: &Address,
) -> Result<i128, PairError> {
    if amount_out_min < 0 {
        return Err(PairError::InvalidAmount);
    }
    let pair = storage::read_pair(env)?;
    let in_is_0 = a_is_token_0(&pair, token_in, token_out)?;

    let amount_out = amount_out_for(env, &pair, amount_in, token_in)?;
    if amount_out == 0 || amount_out < amount_out_min {
        return Err(PairError::InsufficientOutputAmount);
    }

    token::Client::new(env, token_in).transfer(sender, &env.current_contract_address(), &amount_in);
    let (amount_0_out, amount_1_out) = ordered(in_is_0, 0, amount_out);
    swap::swap(env, amount_0_out, amount_1_out, to)?;
    Ok(amount_out)
}
