//! Protocol-wide constants

/// Fixed-point scale shared by shares, prices and collateral accounting (18 decimals)
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// Half of [`WAD`], the neutral spot price of an empty market
pub const HALF_WAD: u128 = WAD / 2;

/// Collateral mints with more decimals than WAD cannot be represented exactly
pub const MAX_COLLATERAL_DECIMALS: u8 = 18;

pub const MAX_QUESTION_LEN: usize = 200;

pub const MAX_SLUG_LEN: usize = 64;

/// Upper bound on the resolver allow-list (sizes the account)
pub const MAX_AUTHORIZED_RESOLVERS: usize = 32;

/// Oracle observations older than this many seconds are refused unless overridden
pub const DEFAULT_MAX_PRICE_AGE: i64 = 60 * 60;

/// Market addresses returned per `get_all_markets` call (bounded by return-data size)
pub const MARKETS_PAGE_SIZE: u64 = 30;
