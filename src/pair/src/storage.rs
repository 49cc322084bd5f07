use soroban_sdk::{contracttype, Address, Env, U256};

use crate::constants::{BUMP_AMOUNT, LIFETIME_THRESHOLD};
use crate::errors::PairError;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    PairStorage,
    ReentrancyGuard,
    TotalSupply,
    Balance(Address),
    Allowance(AllowanceKey),
}

#[contracttype]
#[derive(Clone)]
pub struct AllowanceKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PairStorage {
    pub factory: Address,
    pub token_0: Address,
    pub token_1: Address,
    pub fee_to: Option<Address>,
    pub reserve_0: i128,
    pub reserve_1: i128,
    pub block_timestamp_last: u32,
    pub price_0_cumulative_last: U256,
    pub price_1_cumulative_last: U256,
    pub k_last: U256,
}

impl PairStorage {
    pub fn has_token(&self, token: &Address) -> bool {
        token == &self.token_0 || token == &self.token_1
    }

    /// Stored reserve of `token`, or `None` when it is not one of the pair's tokens.
    pub fn reserve_of(&self, token: &Address) -> Option<i128> {
        if token == &self.token_0 {
            Some(self.reserve_0)
        } else if token == &self.token_1 {
            Some(self.reserve_1)
        } else {
            None
        }
    }
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ReentrancyGuard {
    pub locked: bool,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::PairStorage)
}

pub fn read_pair(env: &Env) -> Result<PairStorage, PairError> {
    env.storage()
        .instance()
        .get(&DataKey::PairStorage)
        .ok_or(PairError::NotInitialized)
}

pub fn write_pair(env: &Env, pair: &PairStorage) {
    env.storage().instance().set(&DataKey::PairStorage, pair);
}

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<_, ReentrancyGuard>(&DataKey::ReentrancyGuard)
        .map(|guard| guard.locked)
        .unwrap_or(false)
}

pub fn set_locked(env: &Env, locked: bool) {
    env.storage()
        .instance()
        .set(&DataKey::ReentrancyGuard, &ReentrancyGuard { locked });
}

pub fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn write_total_supply(env: &Env, total_supply: i128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalSupply, &total_supply);
}

pub fn read_balance(env: &Env, id: &Address) -> i128 {
    let key = DataKey::Balance(id.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(balance) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, LIFETIME_THRESHOLD, BUMP_AMOUNT);
            balance
        }
        None => 0,
    }
}

pub fn write_balance(env: &Env, id: &Address, balance: i128) {
    let key = DataKey::Balance(id.clone());
    env.storage().persistent().set(&key, &balance);
    env.storage()
        .persistent()
        .extend_ttl(&key, LIFETIME_THRESHOLD, BUMP_AMOUNT);
}

/// Allowance of `spender` over `from`'s shares. Zero once expired.
pub fn read_allowance(env: &Env, from: &Address, spender: &Address) -> AllowanceValue {
    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    match env.storage().temporary().get::<_, AllowanceValue>(&key) {
        Some(allowance) if allowance.expiration_ledger >= env.ledger().sequence() => allowance,
        Some(allowance) => AllowanceValue {
            amount: 0,
            expiration_ledger: allowance.expiration_ledger,
        },
        None => AllowanceValue {
            amount: 0,
            expiration_ledger: 0,
        },
    }
}

pub fn write_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
    expiration_ledger: u32,
) -> Result<(), PairError> {
    let sequence = env.ledger().sequence();
    if amount > 0 && expiration_ledger < sequence {
        return Err(PairError::InvalidExpiration);
    }

    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    let allowance = AllowanceValue {
        amount,
        expiration_ledger,
    };
    env.storage().temporary().set(&key, &allowance);

    if amount > 0 {
        let live_for = expiration_ledger - sequence;
        env.storage().temporary().extend_ttl(&key, live_for, live_for);
    }
    Ok(())
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(LIFETIME_THRESHOLD, BUMP_AMOUNT);
}
