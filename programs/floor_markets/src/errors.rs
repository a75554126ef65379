use anchor_lang::prelude::*;

#[error_code]
pub enum MarketError {
    #[msg("Trade size must be greater than zero")]
    NoOpTrade,
    #[msg("Attached payment does not cover the cost")]
    InsufficientPayment,
    #[msg("Share balance too low")]
    InsufficientBalance,
    #[msg("Initial liquidity must be greater than zero and meet the factory minimum")]
    InsufficientLiquidity,
    #[msg("Resolution time has not passed")]
    ResolutionTimeNotPassed,
    #[msg("Caller is not authorized")]
    Unauthorized,
    #[msg("Market is already resolved")]
    MarketAlreadyResolved,
    #[msg("Market is not resolved")]
    MarketNotResolved,
    #[msg("No winning shares to redeem")]
    NothingToRedeem,
    #[msg("Oracle reported an invalid price")]
    OracleDataInvalid,
    #[msg("Oracle price is stale")]
    OracleDataStale,
    #[msg("Resolution time must be in the future")]
    InvalidResolutionTime,
    #[msg("Question exceeds maximum length")]
    QuestionTooLong,
    #[msg("Collection slug exceeds maximum length")]
    SlugTooLong,
    #[msg("Resolver allow-list is full")]
    TooManyResolvers,
    #[msg("Collateral mint has more than 18 decimals")]
    InvalidCollateralMint,
    #[msg("Price feed does not track this market's asset")]
    AssetMismatch,
    #[msg("Math operation overflow")]
    MathOverflow,
}
