/// Swap and flash-loan fee: 0.3% (3 / 1000)
pub const FEE_NUMERATOR: u128 = 3;
pub const FEE_DENOMINATOR: u128 = 1_000;

/// Shares locked forever on the first deposit.
pub const MINIMUM_LIQUIDITY: i128 = 1_000;

/// Reserves must fit in 112 bits so the UQ112x112 price fits in 224.
pub const MAX_RESERVE: i128 = (1i128 << 112) - 1;

/// Protocol takes 1/6 of the growth in sqrt(k).
pub const PROTOCOL_FEE_DIVISOR: u128 = 6;

/// LP share metadata.
pub const SHARE_DECIMALS: u32 = 7;
pub const SHARE_NAME: &str = "Swap Pair LP";
pub const SHARE_SYMBOL: &str = "SPLP";

/// Holder of the locked minimum liquidity. No key exists for this account.
pub const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

// ~1 day of ledgers at 5s close time
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// 7-day TTL bump for instance and share balance entries.
pub const BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const LIFETIME_THRESHOLD: u32 = BUMP_AMOUNT - DAY_IN_LEDGERS;
