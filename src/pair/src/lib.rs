#![no_std]

mod constants;
mod errors;
mod events;
mod fixed_point;
mod flash;
mod guard;
mod liquidity;
mod math;
mod reserves;
mod router;
mod storage;
mod swap;


use soroban_sdk::{contract, contractimpl, Address, Bytes, Env, String, U256};

use crate::constants::{SHARE_DECIMALS, SHARE_NAME, SHARE_SYMBOL};
pub use crate::errors::PairError;
pub use crate::flash::{FlashReceiver, FlashReceiverClient};
use crate::guard::{ensure_deadline, ReentrancyLock};
use crate::liquidity::zero_account;
use crate::storage::PairStorage;

#[contract]
pub struct SwapPair;

#[contractimpl]
impl SwapPair {
    pub fn initialize(
        env: Env,
        factory: Address,
        token_a: Address,
        token_b: Address,
    ) -> Result<(), PairError> {
        if storage::is_initialized(&env) {
            return Err(PairError::AlreadyInitialized);
        }
        factory.require_auth();

        let zero = zero_account(&env);
        if factory == zero || token_a == zero || token_b == zero {
            return Err(PairError::ZeroAddress);
        }
        if token_a == token_b {
            return Err(PairError::IdenticalTokens);
        }

        // Canonical order: a given unordered pair always maps to one layout
        let (token_0, token_1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        let pair = PairStorage {
            factory: factory.clone(),
            token_0: token_0.clone(),
            token_1: token_1.clone(),
            fee_to: None,
            reserve_0: 0,
            reserve_1: 0,
            block_timestamp_last: 0,
            price_0_cumulative_last: math::zero(&env),
            price_1_cumulative_last: math::zero(&env),
            k_last: math::zero(&env),
        };
        storage::write_pair(&env, &pair);
        storage::set_locked(&env, false);
        storage::bump_instance(&env);

        events::Initialized {
            factory,
            token_0,
            token_1,
        }
        .publish(&env);
        Ok(())
    }

    /// Turns the protocol fee on (`Some(receiver)`) or off. Factory only.
    pub fn set_fee_to(env: Env, fee_to: Option<Address>) -> Result<(), PairError> {
        let _lock = ReentrancyLock::acquire(&env)?;
        let mut pair = storage::read_pair(&env)?;
        pair.factory.require_auth();
        pair.fee_to = fee_to.clone();
        storage::write_pair(&env, &pair);
        storage::bump_instance(&env);

        events::FeeToUpdated { fee_to }.publish(&env);
        Ok(())
    }

    // ----- identity and oracle reads -----

    pub fn factory(env: Env) -> Result<Address, PairError> {
        Ok(storage::read_pair(&env)?.factory)
    }

    pub fn token_0(env: Env) -> Result<Address, PairError> {
        Ok(storage::read_pair(&env)?.token_0)
    }

    pub fn token_1(env: Env) -> Result<Address, PairError> {
        Ok(storage::read_pair(&env)?.token_1)
    }

    pub fn fee_to(env: Env) -> Result<Option<Address>, PairError> {
        Ok(storage::read_pair(&env)?.fee_to)
    }

    /// `(reserve_0, reserve_1, block_timestamp_last)`; zeros before initialization.
    pub fn get_reserves(env: Env) -> (i128, i128, u32) {
        match storage::read_pair(&env) {
            Ok(pair) => (pair.reserve_0, pair.reserve_1, pair.block_timestamp_last),
            Err(_) => (0, 0, 0),
        }
    }

    /// Wrapping accumulator of UQ112x112 `reserve_1 / reserve_0` times seconds.
    /// Only differences between two readings are meaningful.
    pub fn price_0_cumulative_last(env: Env) -> Result<U256, PairError> {
        Ok(storage::read_pair(&env)?.price_0_cumulative_last)
    }

    pub fn price_1_cumulative_last(env: Env) -> Result<U256, PairError> {
        Ok(storage::read_pair(&env)?.price_1_cumulative_last)
    }

    pub fn k_last(env: Env) -> Result<U256, PairError> {
        Ok(storage::read_pair(&env)?.k_last)
    }

    // ----- liquidity shares -----

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::read_balance(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::read_total_supply(&env)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), PairError> {
        from.require_auth();
        let _lock = ReentrancyLock::acquire(&env)?;
        liquidity::move_shares(&env, &from, &to, amount)?;
        storage::bump_instance(&env);
        Ok(())
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        storage::read_allowance(&env, &from, &spender).amount
    }

    /// Lets `spender` move up to `amount` of `from`'s shares until
    /// `expiration_ledger`. Overwrites any previous allowance.
    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), PairError> {
        from.require_auth();
        let _lock = ReentrancyLock::acquire(&env)?;
        liquidity::approve(&env, &from, &spender, amount, expiration_ledger)?;
        storage::bump_instance(&env);
        Ok(())
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), PairError> {
        spender.require_auth();
        let _lock = ReentrancyLock::acquire(&env)?;
        liquidity::spend_allowance(&env, &from, &spender, amount)?;
        liquidity::move_shares(&env, &from, &to, amount)?;
        storage::bump_instance(&env);
        Ok(())
    }

    pub fn decimals(_env: Env) -> u32 {
        SHARE_DECIMALS
    }

    pub fn name(env: Env) -> String {
        String::from_str(&env, SHARE_NAME)
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, SHARE_SYMBOL)
    }

    // ----- low-level pair primitives -----

    pub fn sync(env: Env) -> Result<(), PairError> {
        let _lock = ReentrancyLock::acquire(&env)?;
        let mut pair = storage::read_pair(&env)?;
        reserves::sync(&env, &mut pair)?;
        storage::write_pair(&env, &pair);
        storage::bump_instance(&env);
        Ok(())
    }

    /// Sends balances above the reserves to `to`. Returns the amounts sent.
    pub fn skim(env: Env, to: Address) -> Result<(i128, i128), PairError> {
        let _lock = ReentrancyLock::acquire(&env)?;
        let pair = storage::read_pair(&env)?;
        let skimmed = reserves::skim(&env, &pair, &to);
        storage::bump_instance(&env);
        Ok(skimmed)
    }

    pub fn mint(env: Env, to: Address) -> Result<i128, PairError> {
        let _lock = ReentrancyLock::acquire(&env)?;
        let liquidity = liquidity::mint(&env, &to)?;
        storage::bump_instance(&env);
        Ok(liquidity)
    }

    pub fn burn(env: Env, to: Address) -> Result<(i128, i128), PairError> {
        let _lock = ReentrancyLock::acquire(&env)?;
        let amounts = liquidity::burn(&env, &to)?;
        storage::bump_instance(&env);
        Ok(amounts)
    }

    pub fn swap(
        env: Env,
        amount_0_out: i128,
        amount_1_out: i128,
        to: Address,
    ) -> Result<(), PairError> {
        let _lock = ReentrancyLock::acquire(&env)?;
        swap::swap(&env, amount_0_out, amount_1_out, &to)?;
        storage::bump_instance(&env);
        Ok(())
    }

    // ----- deadline-guarded router calls -----

    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity(
        env: Env,
        sender: Address,
        token_a: Address,
        token_b: Address,
        amount_a_desired: i128,
        amount_b_desired: i128,
        amount_a_min: i128,
        amount_b_min: i128,
        to: Address,
        deadline: u64,
    ) -> Result<(i128, i128, i128), PairError> {
        ensure_deadline(&env, deadline)?;
        sender.require_auth();
        let _lock = ReentrancyLock::acquire(&env)?;
        let result = router::add_liquidity(
            &env,
            &sender,
            &token_a,
            &token_b,
            amount_a_desired,
            amount_b_desired,
            amount_a_min,
            amount_b_min,
            &to,
        )?;
        storage::bump_instance(&env);
        Ok(result)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn remove_liquidity(
        env: Env,
        sender: Address,
        token_a: Address,
        token_b: Address,
        liquidity: i128,
        amount_a_min: i128,
        amount_b_min: i128,
        to: Address,
        deadline: u64,
    ) -> Result<(i128, i128), PairError> {
        ensure_deadline(&env, deadline)?;
        sender.require_auth();
        let _lock = ReentrancyLock::acquire(&env)?;
        let result = router::remove_liquidity(
            &env,
            &sender,
            &token_a,
            &token_b,
            liquidity,
            amount_a_min,
            amount_b_min,
            &to,
        )?;
        storage::bump_instance(&env);
        Ok(result)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn swap_exact_tokens_for_tokens(
        env: Env,
        sender: Address,
        amount_in: i128,
        amount_out_min: i128,
        token_in: Address,
        token_out: Address,
        to: Address,
        deadline: u64,
    ) -> Result<i128, PairError> {
        ensure_deadline(&env, deadline)?;
        sender.require_auth();
        let _lock = ReentrancyLock::acquire(&env)?;
        let amount_out = router::swap_exact_tokens_for_tokens(
            &env,
            &sender,
            amount_in,
            amount_out_min,
            &token_in,
            &token_out,
            &to,
        )?;
        storage::bump_instance(&env);
        Ok(amount_out)
    }

    /// Quote for `swap_exact_tokens_for_tokens` at the current reserves.
    pub fn get_amount_out(env: Env, amount_in: i128, token_in: Address) -> Result<i128, PairError> {
        let pair = storage::read_pair(&env)?;
        router::amount_out_for(&env, &pair, amount_in, &token_in)
    }

    // ----- flash loans -----

    pub fn max_flash_loan(env: Env, token: Address) -> i128 {
        match storage::read_pair(&env) {
            Ok(pair) => flash::max_flash_loan(&pair, &token),
            Err(_) => 0,
        }
    }

    pub fn flash_fee(env: Env, token: Address, amount: i128) -> Result<i128, PairError> {
        let pair = storage::read_pair(&env)?;
        flash::flash_fee(&pair, &token, amount)
    }

    /// Lends `amount` of `token` to `receiver` for the duration of its
    /// `on_flash_loan` callback. Fails unless `amount + fee` is back by then.
    pub fn flash_loan(
        env: Env,
        initiator: Address,
        receiver: Address,
        token: Address,
        amount: i128,
        data: Bytes,
    ) -> Result<(), PairError> {
        initiator.require_auth();
        let _lock = ReentrancyLock::acquire(&env)?;
        flash::flash_loan(&env, &initiator, &receiver, &token, amount, &data)?;
        storage::bump_instance(&env);
        Ok(())
    }
}
