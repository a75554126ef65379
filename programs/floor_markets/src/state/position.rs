//! Per-holder share ledger
//!
//! One account per (market, holder). The market's per-outcome totals always
//! equal the sum of these balances.

use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::state::Outcome;

/// Seeds: ["position", market, owner]
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct Position {
    pub market: Pubkey,
    pub owner: Pubkey,
    pub yes_shares: u128,
    pub no_shares: u128,
    pub bump: u8,
}

impl Position {
    pub const SEED: &'static [u8] = b"position";

    /// Fill in identity on a freshly created account, no-op otherwise
    pub fn bind(&mut self, market: Pubkey, owner: Pubkey, bump: u8) {
        if self.owner == Pubkey::default() {
            self.market = market;
            self.owner = owner;
            self.bump = bump;
        }
    }

    pub fn balance(&self, outcome: Outcome) -> u128 {
        match outcome {
            Outcome::Yes => self.yes_shares,
            Outcome::No => self.no_shares,
        }
    }

    fn balance_mut(&mut self, outcome: Outcome) -> &mut u128 {
        match outcome {
            Outcome::Yes => &mut self.yes_shares,
            Outcome::No => &mut self.no_shares,
        }
    }

    pub fn credit(&mut self, outcome: Outcome, shares: u128) -> Result<()> {
        let balance = self.balance_mut(outcome);
        *balance = balance
            .checked_add(shares)
            .ok_or(MarketError::MathOverflow)?;
        Ok(())
    }

    pub fn debit(&mut self, outcome: Outcome, shares: u128) -> Result<()> {
        let balance = self.balance_mut(outcome);
        *balance = balance
            .checked_sub(shares)
            .ok_or(MarketError::InsufficientBalance)?;
        Ok(())
    }
}
