//! Direct Market Resolution
//!
//! The market's creator may settle it directly by reporting the final price
//! once the resolution time has passed. The delegated resolver goes through
//! the instructions in [`resolver`](super::resolver) instead.

use anchor_lang::prelude::*;

use crate::events::MarketResolved;
use crate::state::Market;

#[derive(Accounts)]
pub struct ResolveMarket<'info> {
    /// Creator of the market
    pub authority: Signer<'info>,

    #[account(mut)]
    pub market: Box<Account<'info, Market>>,
}

impl<'info> ResolveMarket<'info> {
    pub fn resolve_market(&mut self, final_price: u128) -> Result<()> {
        let clock = Clock::get()?;
        let authority = self.authority.key();

        let winner = self
            .market
            .resolve(&authority, final_price, clock.unix_timestamp)?;

        emit!(MarketResolved {
            market: self.market.key(),
            winning_outcome: winner,
            final_reported_price: final_price,
            resolved_by: authority,
            timestamp: clock.unix_timestamp,
        });

        msg!("Market resolved: {:?} wins at price {}", winner, final_price);

        Ok(())
    }
}
