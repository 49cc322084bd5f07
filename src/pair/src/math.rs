//! Wide-integer helpers for reserve and price arithmetic.
//!
//! Reserves are capped at 112 bits, so products of two reserves need up to
//! 224 bits. Those intermediates, and the stored price accumulators, are
//! host `U256` values.

use soroban_sdk::{Env, U256};

use crate::errors::PairError;

pub fn zero(env: &Env) -> U256 {
    U256::from_u32(env, 0)
}

/// 2^256 - 1.
pub fn max(env: &Env) -> U256 {
    U256::from_parts(env, u64::MAX, u64::MAX, u64::MAX, u64::MAX)
}

pub fn is_zero(env: &Env, value: &U256) -> bool {
    value == &zero(env)
}

/// Exact product of two 128-bit values.
pub fn full_mul(env: &Env, a: u128, b: u128) -> U256 {
    U256::from_u128(env, a).mul(&U256::from_u128(env, b))
}

/// `a + b` mod 2^256.
pub fn wrapping_add(env: &Env, a: &U256, b: &U256) -> U256 {
    let headroom = max(env).sub(a);
    if b > &headroom {
        b.sub(&headroom).sub(&U256::from_u32(env, 1))
    } else {
        a.add(b)
    }
}

/// Floor division. `None` when `divisor` is zero.
pub fn checked_div(env: &Env, value: &U256, divisor: &U256) -> Option<U256> {
    if is_zero(env, divisor) {
        return None;
    }
    Some(value.div(divisor))
}

/// Floor square root using Newton's method. The root of any 256-bit value
/// fits in 128 bits, so the search starts at `min(value, 2^128)`.
pub fn sqrt(env: &Env, value: &U256) -> Option<u128> {
    if is_zero(env, value) {
        return Some(0);
    }
    let two = U256::from_u32(env, 2);
    let ceiling = U256::from_u32(env, 1).shl(128);
    let mut x = if value > &ceiling {
        ceiling
    } else {
        value.clone()
    };
    let mut y = x.add(&value.div(&x)).div(&two);
    while y < x {
        x = y;
        y = x.add(&value.div(&x)).div(&two);
    }
    x.to_u128()
}

/// `a * b / denominator` with a 256-bit intermediate.
pub fn mul_div(env: &Env, a: u128, b: u128, denominator: u128) -> Option<u128> {
    checked_div(env, &full_mul(env, a, b), &U256::from_u128(env, denominator))?.to_u128()
}

/// Same as [`mul_div`] over non-negative token amounts.
pub fn mul_div_i128(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, PairError> {
    if denominator == 0 {
        return Err(PairError::InsufficientLiquidity);
    }
    let result = mul_div(env, unsigned(a)?, unsigned(b)?, unsigned(denominator)?)
        .ok_or(PairError::Overflow)?;
    signed(result)
}

pub fn unsigned(value: i128) -> Result<u128, PairError> {
    u128::try_from(value).map_err(|_| PairError::InvalidAmount)
}

pub fn signed(value: u128) -> Result<i128, PairError> {
    i128::try_from(value).map_err(|_| PairError::Overflow)
}
