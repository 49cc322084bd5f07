use soroban_sdk::{contractclient, log, token, Address, Bytes, Env};

use crate::constants::{FEE_DENOMINATOR, FEE_NUMERATOR};
use crate::errors::PairError;
use crate::events;
use crate::math::{signed, unsigned};
use crate::reserves;
use crate::storage::{self, PairStorage};

/// Flash loan receiver interface.
///
/// The pair transfers the loan to the receiver and then invokes
/// `on_flash_loan`. Before the callback returns, the receiver must have sent
/// `amount + fee` of `token` back to the pair, or the whole invocation fails.
#[contractclient(name = "FlashReceiverClient")]
pub trait FlashReceiver {
    fn on_flash_loan(
        env: Env,
        initiator: Address,
        token: Address,
        amount: i128,
        fee: i128,
        data: Bytes,
    );
}

/// Whole reserve of `token` is lendable; zero for tokens the pair does not hold.
pub fn max_flash_loan(pair: &PairStorage, token: &Address) -> i128 {
    pair.reserve_of(token).unwrap_or(0)
}

/// `ceil(amount * 3 / 1000)`.
pub fn fee_for(amount: i128) -> Result<i128, PairError> {
    let amount = unsigned(amount)?;
    let scaled = amount
        .checked_mul(FEE_NUMERATOR)
        .ok_or(PairError::Overflow)?;
    signed(scaled.div_ceil(FEE_DENOMINATOR))
}

pub fn flash_fee(pair: &PairStorage, token: &Address, amount: i128) -> Result<i128, PairError> {
    if !pair.has_token(token) {
        return Err(PairError::UnsupportedToken);
    }
    fee_for(amount)
}

pub fn flash_loan(
    env: &Env,
    initiator: &Address,
    receiver: &Address,
    token: &Address,
    amount: i128,
    data: &Bytes,
) -> Result<(), PairError> {
    let mut pair = storage::read_pair(env)?;
    let reserve = pair.reserve_of(token).ok_or(PairError::UnsupportedToken)?;
    if amount <= 0 {
        return Err(PairError::InvalidAmount);
    }
    if amount > reserve {
        return Err(PairError::InsufficientLiquidity);
    }
    let fee = fee_for(amount)?;

    let this = env.current_contract_address();
    let client = token::Client::new(env, token);
    let balance_before = client.balance(&this);

    client.transfer(&this, receiver, &amount);
    FlashReceiverClient::new(env, receiver).on_flash_loan(initiator, token, &amount, &fee, data);

    let balance_after = client.balance(&this);
    let required = balance_before
        .checked_add(fee)
        .ok_or(PairError::Overflow)?;
    if balance_after < required {
        log!(env, "flash loan not repaid", balance_after, required);
        return Err(PairError::FlashLoanNotRepaid);
    }

    reserves::sync(env, &mut pair)?;
    storage::write_pair(env, &pair);

    events::FlashLoan {
        initiator: initiator.clone(),
        receiver: receiver.clone(),
        token: token.clone(),
        amount,
        fee,
    }
    .publish(env);
    Ok(())
}
