//! UQ112x112 prices for the cumulative price oracle.
//!
//! A price is `reserve_other * 2^112 / reserve_self`. With reserves capped at
//! 112 bits it always fits in 224 bits, so `price * elapsed` for a 32-bit
//! `elapsed` cannot overflow. The running sums are allowed to wrap: read two
//! accumulator values and subtract them mod 2^256 to get the time-weighted
//! average over the interval.

use soroban_sdk::{Env, U256};

use crate::math::{checked_div, wrapping_add};

pub const RESOLUTION: u32 = 112;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Uq112x112(U256);

impl Uq112x112 {
    pub fn encode(env: &Env, value: u128) -> Self {
        Uq112x112(U256::from_u128(env, value).shl(RESOLUTION))
    }

    /// Divides by a reserve. `None` for zero.
    pub fn uqdiv(self, env: &Env, divisor: u128) -> Option<Self> {
        checked_div(env, &self.0, &U256::from_u128(env, divisor)).map(Uq112x112)
    }

    /// `numerator / denominator` as a UQ112x112.
    pub fn fraction(env: &Env, numerator: u128, denominator: u128) -> Option<Self> {
        Uq112x112::encode(env, numerator).uqdiv(env, denominator)
    }

    pub fn raw(&self) -> &U256 {
        &self.0
    }
}

/// Adds `price * elapsed` to `cumulative`, wrapping mod 2^256.
pub fn accumulate(env: &Env, cumulative: &U256, price: &Uq112x112, elapsed: u32) -> U256 {
    let weighted = price.raw().mul(&U256::from_u32(env, elapsed));
    wrapping_add(env, cumulative, &weighted)
}
