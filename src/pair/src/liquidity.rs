use soroban_sdk::{token, Address, Env, String, U256};

use crate::constants::{MINIMUM_LIQUIDITY, PROTOCOL_FEE_DIVISOR, ZERO_ACCOUNT};
use crate::errors::PairError;
use crate::events;
use crate::math::{self, mul_div_i128, signed, unsigned};
use crate::reserves;
use crate::storage::{self, PairStorage};

pub fn zero_account(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, ZERO_ACCOUNT))
}

pub fn mint_shares(env: &Env, to: &Address, amount: i128) -> Result<(), PairError> {
    let total_supply = storage::read_total_supply(env)
        .checked_add(amount)
        .ok_or(PairError::Overflow)?;
    let balance = storage::read_balance(env, to)
        .checked_add(amount)
        .ok_or(PairError::Overflow)?;
    storage::write_total_supply(env, total_supply);
    storage::write_balance(env, to, balance);

    events::Transfer {
        from: None,
        to: Some(to.clone()),
        amount,
    }
    .publish(env);
    Ok(())
}

pub fn burn_shares(env: &Env, from: &Address, amount: i128) -> Result<(), PairError> {
    let balance = storage::read_balance(env, from);
    if balance < amount {
        return Err(PairError::InsufficientBalance);
    }
    storage::write_balance(env, from, balance - amount);
    storage::write_total_supply(env, storage::read_total_supply(env) - amount);

    events::Transfer {
        from: Some(from.clone()),
        to: None,
        amount,
    }
    .publish(env);
    Ok(())
}

pub fn move_shares(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), PairError> {
    if amount < 0 {
        return Err(PairError::InvalidAmount);
    }
    let from_balance = storage::read_balance(env, from);
    if from_balance < amount {
        return Err(PairError::InsufficientBalance);
    }
    storage::write_balance(env, from, from_balance - amount);
    let to_balance = storage::read_balance(env, to)
        .checked_add(amount)
        .ok_or(PairError::Overflow)?;
    storage::write_balance(env, to, to_balance);

    events::Transfer {
        from: Some(from.clone()),
        to: Some(to.clone()),
        amount,
    }
    .publish(env);
    Ok(())
}

pub fn approve(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
    expiration_ledger: u32,
) -> Result<(), PairError> {
    if amount < 0 {
        return Err(PairError::InvalidAmount);
    }
    storage::write_allowance(env, from, spender, amount, expiration_ledger)?;

    events::Approve {
        from: from.clone(),
        spender: spender.clone(),
        amount,
        expiration_ledger,
    }
    .publish(env);
    Ok(())
}

pub fn spend_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), PairError> {
    if amount < 0 {
        return Err(PairError::InvalidAmount);
    }
    let allowance = storage::read_allowance(env, from, spender);
    if allowance.amount < amount {
        return Err(PairError::InsufficientAllowance);
    }
    if amount > 0 {
        storage::write_allowance(
            env,
            from,
            spender,
            allowance.amount - amount,
            allowance.expiration_ledger,
        )?;
    }
    Ok(())
}

/// Reserve product, used as `k_last` while the protocol fee is on.
pub fn reserve_product(env: &Env, pair: &PairStorage) -> U256 {
    math::full_mul(env, pair.reserve_0 as u128, pair.reserve_1 as u128)
}

/// Mints the protocol's cut of the growth in sqrt(k) since the last
/// liquidity event. Returns whether the protocol fee is on.
pub fn mint_fee(env: &Env, pair: &mut PairStorage) -> Result<bool, PairError> {
    let fee_to = match pair.fee_to.clone() {
        Some(fee_to) => fee_to,
        None => {
            if !math::is_zero(env, &pair.k_last) {
                pair.k_last = math::zero(env);
            }
            return Ok(false);
        }
    };

    if math::is_zero(env, &pair.k_last) {
        return Ok(true);
    }

    let root_k = math::sqrt(env, &reserve_product(env, pair)).ok_or(PairError::Overflow)?;
    let root_k_last = math::sqrt(env, &pair.k_last).ok_or(PairError::Overflow)?;
    if root_k > root_k_last {
        let total_supply = unsigned(storage::read_total_supply(env))?;
        let denominator = root_k
            .checked_mul(PROTOCOL_FEE_DIVISOR - 1)
            .and_then(|scaled| scaled.checked_add(root_k_last))
            .ok_or(PairError::Overflow)?;
        let liquidity = math::mul_div(env, total_supply, root_k - root_k_last, denominator)
            .ok_or(PairError::Overflow)?;
        if liquidity > 0 {
            mint_shares(env, &fee_to, signed(liquidity)?)?;
        }
    }
    Ok(true)
}

/// Issues shares for tokens already transferred into the pair.
pub fn mint(env: &Env, to: &Address) -> Result<i128, PairError> {
    let mut pair = storage::read_pair(env)?;
    let (balance_0, balance_1) = reserves::token_balances(env, &pair);
    let amount_0 = balance_0 - pair.reserve_0;
    let amount_1 = balance_1 - pair.reserve_1;

    let fee_on = mint_fee(env, &mut pair)?;
    let total_supply = storage::read_total_supply(env);

    let liquidity = if total_supply == 0 {
        if amount_0 <= 0 || amount_1 <= 0 {
            return Err(PairError::InsufficientInitialLiquidity);
        }
        let product = math::full_mul(env, amount_0 as u128, amount_1 as u128);
        let root = signed(math::sqrt(env, &product).ok_or(PairError::Overflow)?)?;
        let liquidity = root - MINIMUM_LIQUIDITY;
        if liquidity <= 0 {
            return Err(PairError::InsufficientInitialLiquidity);
        }
        mint_shares(env, &zero_account(env), MINIMUM_LIQUIDITY)?;
        liquidity
    } else {
        if amount_0 <= 0 || amount_1 <= 0 {
            return Err(PairError::InsufficientLiquidityMinted);
        }
        let share_0 = mul_div_i128(env, amount_0, total_supply, pair.reserve_0)?;
        let share_1 = mul_div_i128(env, amount_1, total_supply, pair.reserve_1)?;
        share_0.min(share_1)
    };
    if liquidity <= 0 {
        return Err(PairError::InsufficientLiquidityMinted);
    }
    mint_shares(env, to, liquidity)?;

    reserves::update(env, &mut pair, balance_0, balance_1)?;
    if fee_on {
        pair.k_last = reserve_product(env, &pair);
    }
    storage::write_pair(env, &pair);

    events::Mint {
        to: to.clone(),
        amount_0,
        amount_1,
        liquidity,
    }
    .publish(env);
    Ok(liquidity)
}

/// Redeems the shares held by the pair itself, paying out a pro-rata cut of
/// the current balances to `to`.
pub fn burn(env: &Env, to: &Address) -> Result<(i128, i128), PairError> {
    let mut pair = storage::read_pair(env)?;
    let this = env.current_contract_address();
    let (balance_0, balance_1) = reserves::token_balances(env, &pair);
    let liquidity = storage::read_balance(env, &this);

    let fee_on = mint_fee(env, &mut pair)?;
    let total_supply = storage::read_total_supply(env);
    if liquidity <= 0 || total_supply == 0 {
        return Err(PairError::InsufficientLiquidityBurned);
    }

    let amount_0 = mul_div_i128(env, liquidity, balance_0, total_supply)?;
    let amount_1 = mul_div_i128(env, liquidity, balance_1, total_supply)?;
    if amount_0 <= 0 || amount_1 <= 0 {
        return Err(PairError::InsufficientLiquidityBurned);
    }

    burn_shares(env, &this, liquidity)?;
    token::Client::new(env, &pair.token_0).transfer(&this, to, &amount_0);
    token::Client::new(env, &pair.token_1).transfer(&this, to, &amount_1);

    let (balance_0, balance_1) = reserves::token_balances(env, &pair);
    reserves::update(env, &mut pair, balance_0, balance_1)?;
    if fee_on {
        pair.k_last = reserve_product(env, &pair);
    }
    storage::write_pair(env, &pair);

    events::Burn {
        to: to.clone(),
        amount_0,
        amount_1,
        liquidity,
    }
    .publish(env);
    Ok((amount_0, amount_1))
}
