//! Winnings Redemption
//!
//! After resolution each winning share is worth exactly one unit of
//! collateral. Losing shares are worthless and stay in the position.
//!
//! ```text
//! payout = winning_shares * 1.0   (rounded down to a collateral base unit)
//! ```

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::errors::MarketError;
use crate::events::SharesRedeemed;
use crate::instructions::vault;
use crate::state::{Market, Position};

/// Accounts for redemption
#[derive(Accounts)]
pub struct Redeem<'info> {
    /// User redeeming their position
    #[account(mut)]
    pub user: Signer<'info>,

    /// Resolved market
    #[account(mut)]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [Position::SEED, market.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, Position>>,

    #[account(
        address = market.collateral_mint @ MarketError::InvalidCollateralMint,
    )]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Market's collateral vault
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
        associated_token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Redeem<'info> {
    /// Redeem the full winning balance
    pub fn redeem(&mut self) -> Result<u128> {
        self.settle(None)
    }

    /// Redeem `amount` winning shares, leaving the rest in place
    pub fn redeem_partial(&mut self, amount: u128) -> Result<u128> {
        self.settle(Some(amount))
    }

    fn settle(&mut self, amount: Option<u128>) -> Result<u128> {
        let redemption = self.market.redeem(&mut self.position, amount)?;

        vault::withdraw(
            &self.market,
            &self.vault,
            &self.user_collateral,
            &self.collateral_mint,
            &self.token_program,
            redemption.collateral.units,
        )?;

        emit!(SharesRedeemed {
            market: self.market.key(),
            user: self.user.key(),
            shares_burned: redemption.shares,
            collateral_received: redemption.collateral.wad,
        });

        msg!(
            "Redeemed {} shares for {}",
            redemption.shares,
            redemption.collateral.wad
        );

        Ok(redemption.collateral.wad)
    }
}
