//! Market Creation
//!
//! Anyone can create a market by:
//! 1. Asking a yes/no question about a tracked price series
//! 2. Setting a target price and a resolution time
//! 3. Providing initial liquidity
//!
//! The creator receives equal YES and NO supply backed by that liquidity, which
//! opens the market at a 50/50 price.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::errors::MarketError;
use crate::events::{LiquidityProvided, MarketCreated};
use crate::instructions::vault;
use crate::state::{Market, MarketFactory, MarketTerms, Position, PriceFeed};

/// Accounts for creating a new prediction market
#[derive(Accounts)]
pub struct CreateMarket<'info> {
    /// Market creator (pays for accounts, provides liquidity)
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [MarketFactory::SEED],
        bump = factory.bump,
    )]
    pub factory: Box<Account<'info, MarketFactory>>,

    /// The new market account
    #[account(
        init,
        payer = creator,
        space = 8 + Market::INIT_SPACE,
        seeds = [Market::SEED, factory.key().as_ref(), factory.market_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: Box<Account<'info, Market>>,

    /// Receives the seeded YES/NO shares
    #[account(
        init,
        payer = creator,
        space = 8 + Position::INIT_SPACE,
        seeds = [Position::SEED, market.key().as_ref(), creator.key().as_ref()],
        bump,
    )]
    pub creator_position: Box<Account<'info, Position>>,

    #[account(
        address = factory.collateral_mint @ MarketError::InvalidCollateralMint,
    )]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = creator,
        token::token_program = token_program,
    )]
    pub creator_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Market's collateral vault
    #[account(
        init,
        payer = creator,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
        associated_token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> CreateMarket<'info> {
    /// Deploy and seed a market, returning its address
    pub fn create_market(
        &mut self,
        question: String,
        collection_slug: String,
        target_price: u128,
        resolution_timestamp: i64,
        initial_liquidity: u64,
        bumps: &CreateMarketBumps,
    ) -> Result<Pubkey> {
        let clock = Clock::get()?;
        let factory_key = self.factory.key();
        let market_key = self.market.key();
        let creator_key = self.creator.key();

        let asset_id = PriceFeed::asset_id(&collection_slug);
        let terms = MarketTerms {
            question,
            collection_slug,
            target_price,
            resolution_timestamp,
        };

        let market = self.factory.open_market(
            factory_key,
            creator_key,
            terms,
            asset_id,
            initial_liquidity,
            clock.unix_timestamp,
            bumps.market,
        )?;
        self.market.set_inner(market);
        self.creator_position
            .bind(market_key, creator_key, bumps.creator_position);

        let seed = self
            .market
            .seed_liquidity(&mut self.creator_position, initial_liquidity)?;

        vault::deposit(
            &self.creator_collateral,
            &self.vault,
            &self.collateral_mint,
            &self.creator,
            &self.token_program,
            seed.collateral.units,
        )?;

        emit!(MarketCreated {
            market: market_key,
            creator: creator_key,
            question: self.market.question.clone(),
            collection_slug: self.market.collection_slug.clone(),
            target_price,
            resolution_timestamp,
        });

        emit!(LiquidityProvided {
            market: market_key,
            provider: creator_key,
            collateral_amount: seed.collateral.wad,
            initial_yes_shares: seed.shares,
            initial_no_shares: seed.shares,
        });

        msg!(
            "Market {} created at {} (target {}, resolves at {})",
            self.market.index,
            market_key,
            target_price,
            resolution_timestamp
        );

        Ok(market_key)
    }
}
