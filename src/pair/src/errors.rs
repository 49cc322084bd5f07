use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PairError {
    AlreadyInitialized = 100,
    ZeroAddress = 101,
    IdenticalTokens = 102,
    InsufficientLiquidityMinted = 103,
    InsufficientLiquidityBurned = 104,
    InsufficientOutputAmount = 105,
    InsufficientLiquidity = 106,
    InvalidAmount = 107,
    InvariantViolation = 108,
    InsufficientInputAmount = 109,
    Reentrant = 110,
    TransactionExpired = 111,
    NotInitialized = 112,
    InsufficientInitialLiquidity = 113,
    InvalidTo = 114,
    FlashLoanNotRepaid = 115,
    UnsupportedToken = 116,
    InsufficientAAmount = 117,
    InsufficientBAmount = 118,
    InsufficientBalance = 119,
    Overflow = 120,
    InsufficientAllowance = 121,
    InvalidExpiration = 122,
}
