use soroban_sdk::Env;

use crate::errors::PairError;
use crate::storage;

/// Holds the pair's reentrancy latch for the lifetime of the value.
///
/// The latch is cleared on drop, so every exit path of an entry point,
/// including early `?` returns, releases it.
pub struct ReentrancyLock<'a> {
    env: &'a Env,
}

impl<'a> ReentrancyLock<'a> {
    pub fn acquire(env: &'a Env) -> Result<Self, PairError> {
        if storage::is_locked(env) {
            return Err(PairError::Reentrant);
        }
        storage::set_locked(env, true);
        Ok(ReentrancyLock { env })
    }
}

impl Drop for ReentrancyLock<'_> {
    fn drop(&mut self) {
        storage::set_locked(self.env, false);
    }
}

pub fn ensure_deadline(env: &Env, deadline: u64) -> Result<(), PairError> {
    if env.ledger().timestamp() > deadline {
        return Err(PairError::TransactionExpired);
    }
    Ok(())
}
