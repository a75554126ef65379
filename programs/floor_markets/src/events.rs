//! Event log consumed by off-chain indexers
//!
//! Amounts are WAD (18 decimals) unless the field name says otherwise.

use anchor_lang::prelude::*;

use crate::state::Outcome;

#[event]
pub struct MarketCreated {
    pub market: Pubkey,
    pub creator: Pubkey,
    pub question: String,
    pub collection_slug: String,
    pub target_price: u128,
    pub resolution_timestamp: i64,
}

#[event]
pub struct LiquidityProvided {
    pub market: Pubkey,
    pub provider: Pubkey,
    pub collateral_amount: u128,
    pub initial_yes_shares: u128,
    pub initial_no_shares: u128,
}

#[event]
pub struct Trade {
    pub market: Pubkey,
    pub user: Pubkey,
    pub outcome: Outcome,
    pub collateral_amount: u128,
    pub share_amount: u128,
    pub is_buy: bool,
}

#[event]
pub struct MarketResolved {
    pub market: Pubkey,
    pub winning_outcome: Outcome,
    pub final_reported_price: u128,
    pub resolved_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct SharesRedeemed {
    pub market: Pubkey,
    pub user: Pubkey,
    pub shares_burned: u128,
    pub collateral_received: u128,
}

#[event]
pub struct ResolverAuthorized {
    pub resolver: Pubkey,
    pub reporter: Pubkey,
}

#[event]
pub struct ResolverRevoked {
    pub resolver: Pubkey,
    pub reporter: Pubkey,
}

#[event]
pub struct PricePublished {
    pub asset_id: [u8; 32],
    pub collection_slug: String,
    pub price: u128,
    pub observed_at: i64,
    pub is_valid: bool,
}
