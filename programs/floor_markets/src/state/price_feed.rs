//! External price collaborator
//!
//! The resolver only needs one question answered: what did the tracked series
//! settle at, when was that observed, and does the source vouch for it.
//! [`PriceOracle`] is that seam. [`PriceFeed`] is the on-chain implementation,
//! an account the resolver's oracle authority keeps up to date.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;

use crate::constants::MAX_SLUG_LEN;
use crate::errors::MarketError;

/// A single reading of a tracked price series
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceObservation {
    /// WAD
    pub price: u128,
    pub observed_at: i64,
    pub is_valid: bool,
}

pub trait PriceOracle {
    fn final_price(&self, asset_id: &[u8; 32]) -> Result<PriceObservation>;
}

/// Latest published price for one asset
///
/// Seeds: ["price_feed", resolver, asset_id]
#[account]
#[derive(InitSpace, Debug)]
pub struct PriceFeed {
    pub resolver: Pubkey,

    pub asset_id: [u8; 32],

    #[max_len(MAX_SLUG_LEN)]
    pub collection_slug: String,

    pub price: u128,

    pub observed_at: i64,

    pub is_valid: bool,

    pub bump: u8,
}

impl PriceFeed {
    pub const SEED: &'static [u8] = b"price_feed";

    /// Stable 32-byte id for a collection slug
    pub fn asset_id(collection_slug: &str) -> [u8; 32] {
        hash(collection_slug.as_bytes()).to_bytes()
    }

    pub fn publish(&mut self, price: u128, is_valid: bool, now: i64) {
        self.price = price;
        self.is_valid = is_valid;
        self.observed_at = now;
    }
}

impl PriceOracle for PriceFeed {
    fn final_price(&self, asset_id: &[u8; 32]) -> Result<PriceObservation> {
        require!(self.asset_id == *asset_id, MarketError::AssetMismatch);
        Ok(PriceObservation {
            price: self.price,
            observed_at: self.observed_at,
            is_valid: self.is_valid,
        })
    }
}
