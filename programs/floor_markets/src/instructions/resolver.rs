//! Resolver Instructions
//!
//! Allow-list management, the two resolution paths, and price publication
//! for the on-chain oracle feed.

use anchor_lang::prelude::*;

use crate::constants::MAX_SLUG_LEN;
use crate::errors::MarketError;
use crate::events::{MarketResolved, PricePublished, ResolverAuthorized, ResolverRevoked};
use crate::state::{Market, MarketResolver, PriceFeed};

/// Owner-only allow-list changes
#[derive(Accounts)]
pub struct ManageResolvers<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [MarketResolver::SEED],
        bump = resolver.bump,
    )]
    pub resolver: Account<'info, MarketResolver>,
}

impl<'info> ManageResolvers<'info> {
    pub fn authorize_resolver(&mut self, reporter: Pubkey) -> Result<()> {
        let owner = self.owner.key();
        if self.resolver.authorize(&owner, reporter)? {
            emit!(ResolverAuthorized {
                resolver: self.resolver.key(),
                reporter,
            });
            msg!("Reporter authorized: {}", reporter);
        }
        Ok(())
    }

    pub fn revoke_resolver(&mut self, reporter: Pubkey) -> Result<()> {
        let owner = self.owner.key();
        if self.resolver.revoke(&owner, &reporter)? {
            emit!(ResolverRevoked {
                resolver: self.resolver.key(),
                reporter,
            });
            msg!("Reporter revoked: {}", reporter);
        }
        Ok(())
    }
}

/// Resolution with a price supplied by an allow-listed reporter
#[derive(Accounts)]
pub struct ResolveMarketManual<'info> {
    pub reporter: Signer<'info>,

    #[account(
        seeds = [MarketResolver::SEED],
        bump = resolver.bump,
    )]
    pub resolver: Account<'info, MarketResolver>,

    #[account(mut)]
    pub market: Box<Account<'info, Market>>,
}

impl<'info> ResolveMarketManual<'info> {
    pub fn resolve_market_manual(&mut self, final_price: u128) -> Result<()> {
        let clock = Clock::get()?;
        let resolver_key = self.resolver.key();
        let reporter = self.reporter.key();

        let winner = self.resolver.resolve_manual(
            &resolver_key,
            &reporter,
            &mut self.market,
            final_price,
            clock.unix_timestamp,
        )?;

        emit!(MarketResolved {
            market: self.market.key(),
            winning_outcome: winner,
            final_reported_price: final_price,
            resolved_by: reporter,
            timestamp: clock.unix_timestamp,
        });

        msg!(
            "Market manually resolved by {}: {:?} at {}",
            reporter,
            winner,
            final_price
        );

        Ok(())
    }
}

/// Permissionless resolution from the market's price feed
#[derive(Accounts)]
pub struct ResolveMarketFromOracle<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [MarketResolver::SEED],
        bump = resolver.bump,
    )]
    pub resolver: Account<'info, MarketResolver>,

    #[account(mut)]
    pub market: Box<Account<'info, Market>>,

    #[account(
        seeds = [PriceFeed::SEED, resolver.key().as_ref(), market.asset_id.as_ref()],
        bump = price_feed.bump,
    )]
    pub price_feed: Account<'info, PriceFeed>,
}

impl<'info> ResolveMarketFromOracle<'info> {
    pub fn resolve_market_from_oracle(&mut self) -> Result<()> {
        let clock = Clock::get()?;
        let resolver_key = self.resolver.key();
        let feed: &PriceFeed = &self.price_feed;

        let (winner, price) = self.resolver.resolve_from_oracle(
            &resolver_key,
            &mut self.market,
            feed,
            clock.unix_timestamp,
        )?;

        emit!(MarketResolved {
            market: self.market.key(),
            winning_outcome: winner,
            final_reported_price: price,
            resolved_by: resolver_key,
            timestamp: clock.unix_timestamp,
        });

        msg!(
            "Market resolved from oracle ({}): {:?} at {}",
            self.price_feed.collection_slug,
            winner,
            price
        );

        Ok(())
    }
}

/// Oracle authority pushes the latest reading for one collection
#[derive(Accounts)]
#[instruction(asset_id: [u8; 32])]
pub struct PublishPrice<'info> {
    #[account(mut)]
    pub oracle: Signer<'info>,

    #[account(
        seeds = [MarketResolver::SEED],
        bump = resolver.bump,
        constraint = resolver.oracle == oracle.key() @ MarketError::Unauthorized,
    )]
    pub resolver: Account<'info, MarketResolver>,

    #[account(
        init_if_needed,
        payer = oracle,
        space = 8 + PriceFeed::INIT_SPACE,
        seeds = [PriceFeed::SEED, resolver.key().as_ref(), asset_id.as_ref()],
        bump,
    )]
    pub price_feed: Account<'info, PriceFeed>,

    pub system_program: Program<'info, System>,
}

impl<'info> PublishPrice<'info> {
    pub fn publish_price(
        &mut self,
        asset_id: [u8; 32],
        collection_slug: String,
        price: u128,
        is_valid: bool,
        bumps: &PublishPriceBumps,
    ) -> Result<()> {
        require!(
            collection_slug.len() <= MAX_SLUG_LEN,
            MarketError::SlugTooLong
        );
        require!(
            PriceFeed::asset_id(&collection_slug) == asset_id,
            MarketError::AssetMismatch
        );

        let clock = Clock::get()?;
        let feed = &mut self.price_feed;
        if feed.resolver == Pubkey::default() {
            feed.resolver = self.resolver.key();
            feed.asset_id = asset_id;
            feed.collection_slug = collection_slug.clone();
            feed.bump = bumps.price_feed;
        }
        feed.publish(price, is_valid, clock.unix_timestamp);

        emit!(PricePublished {
            asset_id,
            collection_slug,
            price,
            observed_at: clock.unix_timestamp,
            is_valid,
        });

        msg!("Price published: {} (valid: {})", price, is_valid);

        Ok(())
    }
}
