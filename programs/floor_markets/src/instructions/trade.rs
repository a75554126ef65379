//! Share Trading
//!
//! Buys and sells YES/NO shares against the market's Pythagorean curve.
//! Share balances live in the trader's [`Position`]; collateral moves between
//! the trader's token account and the market vault.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::errors::MarketError;
use crate::events::Trade;
use crate::instructions::vault;
use crate::state::{Market, Outcome, Position};

/// Accounts for trading operations
#[derive(Accounts)]
pub struct TradeShares<'info> {
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Market being traded on
    #[account(mut)]
    pub market: Box<Account<'info, Market>>,

    /// Trader's share ledger, created on first trade
    #[account(
        init_if_needed,
        payer = trader,
        space = 8 + Position::INIT_SPACE,
        seeds = [Position::SEED, market.key().as_ref(), trader.key().as_ref()],
        bump,
    )]
    pub position: Box<Account<'info, Position>>,

    #[account(
        address = market.collateral_mint @ MarketError::InvalidCollateralMint,
    )]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = trader,
        token::token_program = token_program,
    )]
    pub trader_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Market's collateral vault
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
        associated_token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> TradeShares<'info> {
    /// Buy exactly `shares` of `outcome`, paying at most `max_payment` base units
    ///
    /// Returns the collateral charged (WAD).
    pub fn buy(
        &mut self,
        outcome: Outcome,
        shares: u128,
        max_payment: u64,
        bumps: &TradeSharesBumps,
    ) -> Result<u128> {
        let market_key = self.market.key();
        let trader_key = self.trader.key();
        self.position.bind(market_key, trader_key, bumps.position);

        let cost = self
            .market
            .buy(&mut self.position, outcome, shares, max_payment)?;

        vault::deposit(
            &self.trader_collateral,
            &self.vault,
            &self.collateral_mint,
            &self.trader,
            &self.token_program,
            cost.units,
        )?;

        emit!(Trade {
            market: market_key,
            user: trader_key,
            outcome,
            collateral_amount: cost.wad,
            share_amount: shares,
            is_buy: true,
        });

        msg!("Bought {} {:?} shares for {}", shares, outcome, cost.wad);

        Ok(cost.wad)
    }

    /// Sell `shares` of `outcome` back to the curve
    ///
    /// Returns the collateral paid out (WAD).
    pub fn sell(&mut self, outcome: Outcome, shares: u128) -> Result<u128> {
        let market_key = self.market.key();
        let trader_key = self.trader.key();

        let proceeds = self.market.sell(&mut self.position, outcome, shares)?;

        vault::withdraw(
            &self.market,
            &self.vault,
            &self.trader_collateral,
            &self.collateral_mint,
            &self.token_program,
            proceeds.units,
        )?;

        emit!(Trade {
            market: market_key,
            user: trader_key,
            outcome,
            collateral_amount: proceeds.wad,
            share_amount: shares,
            is_buy: false,
        });

        msg!("Sold {} {:?} shares for {}", shares, outcome, proceeds.wad);

        Ok(proceeds.wad)
    }
}
