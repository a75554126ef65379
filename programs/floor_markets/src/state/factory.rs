//! Market Factory
//!
//! Singleton that deploys markets. Its only mutable state is the market counter:
//! market `i` lives at the PDA `["market", factory, i]`, so the deployed
//! markets form an append-only sequence in creation order.

use anchor_lang::prelude::*;

use crate::amm::wad::collateral_scale;
use crate::constants::MARKETS_PAGE_SIZE;
use crate::errors::MarketError;
use crate::state::{Market, MarketStatus, MarketTerms};

/// Global factory account (singleton PDA)
///
/// Seeds: ["market_factory"]
#[account]
#[derive(InitSpace, Debug)]
pub struct MarketFactory {
    /// Deployer; informational only
    pub authority: Pubkey,

    /// Collateral token mint (wrapped SOL for native collateral)
    pub collateral_mint: Pubkey,

    pub collateral_decimals: u8,

    /// Delegated resolver every new market trusts
    pub resolver: Pubkey,

    /// Minimum initial liquidity in collateral base units
    pub min_liquidity: u64,

    /// Markets deployed so far (next market index)
    pub market_count: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl MarketFactory {
    pub const SEED: &'static [u8] = b"market_factory";

    pub fn configure(
        authority: Pubkey,
        collateral_mint: Pubkey,
        collateral_decimals: u8,
        resolver: Pubkey,
        min_liquidity: u64,
        bump: u8,
    ) -> Result<Self> {
        // rejects mints finer than WAD
        collateral_scale(collateral_decimals)?;

        Ok(Self {
            authority,
            collateral_mint,
            collateral_decimals,
            resolver,
            min_liquidity: min_liquidity.max(1),
            market_count: 0,
            bump,
        })
    }

    /// Build the next market and append it to the enumeration
    ///
    /// The returned market is empty; the caller seeds it with the same
    /// `initial_liquidity` once the vault exists.
    #[allow(clippy::too_many_arguments)]
    pub fn open_market(
        &mut self,
        factory: Pubkey,
        creator: Pubkey,
        terms: MarketTerms,
        asset_id: [u8; 32],
        initial_liquidity: u64,
        now: i64,
        bump: u8,
    ) -> Result<Market> {
        require!(
            initial_liquidity > 0 && initial_liquidity >= self.min_liquidity,
            MarketError::InsufficientLiquidity
        );
        terms.validate(now)?;

        let market = Market {
            factory,
            index: self.market_count,
            creator,
            resolver: self.resolver,
            question: terms.question,
            collection_slug: terms.collection_slug,
            asset_id,
            target_price: terms.target_price,
            resolution_timestamp: terms.resolution_timestamp,
            created_at: now,
            collateral_mint: self.collateral_mint,
            collateral_decimals: self.collateral_decimals,
            yes_shares_total: 0,
            no_shares_total: 0,
            collateral_balance: 0,
            status: MarketStatus::Open,
            winning_outcome: None,
            final_reported_price: None,
            resolved_at: None,
            bump,
        };

        self.market_count = self
            .market_count
            .checked_add(1)
            .ok_or(MarketError::MathOverflow)?;

        Ok(market)
    }

    /// PDA of the market at `index`
    pub fn market_address(factory: &Pubkey, index: u64, program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Market::SEED, factory.as_ref(), &index.to_le_bytes()],
            program_id,
        )
    }

    /// Every deployed market, oldest first
    pub fn all_markets(&self, factory: &Pubkey, program_id: &Pubkey) -> Vec<Pubkey> {
        (0..self.market_count)
            .map(|index| Self::market_address(factory, index, program_id).0)
            .collect()
    }

    /// Up to [`MARKETS_PAGE_SIZE`] markets starting at index `start`
    pub fn markets_page(&self, factory: &Pubkey, program_id: &Pubkey, start: u64) -> Vec<Pubkey> {
        let end = start
            .saturating_add(MARKETS_PAGE_SIZE)
            .min(self.market_count);
        (start..end)
            .map(|index| Self::market_address(factory, index, program_id).0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WAD;

    fn factory() -> MarketFactory {
        MarketFactory::configure(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            9,
            Pubkey::new_unique(),
            0,
            254,
        )
        .unwrap()
    }

    fn terms(question: &str) -> MarketTerms {
        MarketTerms {
            question: question.to_string(),
            collection_slug: "cryptopunks".to_string(),
            target_price: 50 * WAD,
            resolution_timestamp: 2_000,
        }
    }

    #[test]
    fn test_rejects_fine_grained_mint() {
        let err = MarketFactory::configure(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            19,
            Pubkey::new_unique(),
            1,
            255,
        )
        .unwrap_err();
        assert_eq!(err, MarketError::InvalidCollateralMint.into());
    }

    #[test]
    fn test_open_market_requires_liquidity() {
        let mut factory = factory();
        let key = Pubkey::new_unique();
        let err = factory
            .open_market(key, Pubkey::new_unique(), terms("q"), [0; 32], 0, 1_000, 255)
            .unwrap_err();
        assert_eq!(err, MarketError::InsufficientLiquidity.into());
        assert_eq!(factory.market_count, 0);
    }

    #[test]
    fn test_markets_enumerate_in_creation_order() {
        let mut factory = factory();
        let key = Pubkey::new_unique();
        let program_id = crate::ID;
        let creator = Pubkey::new_unique();

        let first = factory
            .open_market(key, creator, terms("first"), [1; 32], 10, 1_000, 255)
            .unwrap();
        let second = factory
            .open_market(key, creator, terms("second"), [2; 32], 10, 1_000, 255)
            .unwrap();

        assert_eq!((first.index, second.index), (0, 1));
        assert_eq!(first.resolver, factory.resolver);
        assert_eq!(second.collateral_decimals, 9);

        let markets = factory.all_markets(&key, &program_id);
        assert_eq!(markets.len(), 2);
        assert_eq!(markets[0], MarketFactory::market_address(&key, 0, &program_id).0);
        assert_eq!(markets[1], MarketFactory::market_address(&key, 1, &program_id).0);
        assert_ne!(markets[0], markets[1]);

        assert_eq!(factory.markets_page(&key, &program_id, 0), markets);
        assert_eq!(factory.markets_page(&key, &program_id, 1), markets[1..]);
        assert!(factory.markets_page(&key, &program_id, 5).is_empty());
    }

    #[test]
    fn test_markets_page_is_bounded() {
        let mut factory = factory();
        let key = Pubkey::new_unique();
        factory.market_count = MARKETS_PAGE_SIZE + 5;

        let first = factory.markets_page(&key, &crate::ID, 0);
        let rest = factory.markets_page(&key, &crate::ID, MARKETS_PAGE_SIZE);
        assert_eq!(first.len() as u64, MARKETS_PAGE_SIZE);
        assert_eq!(rest.len(), 5);
        assert_eq!(rest[0], MarketFactory::market_address(&key, MARKETS_PAGE_SIZE, &crate::ID).0);
    }
}
