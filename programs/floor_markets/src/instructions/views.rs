//! Read-only queries
//!
//! These instructions never write. Clients run them through transaction
//! simulation and decode the instruction return data.

use anchor_lang::prelude::*;

use crate::amm::PythagoreanCurve;
use crate::state::{
    Market, MarketFactory, MarketInfo, MarketResolver, Outcome, Position, PositionValue,
    ResolutionReadiness, UserBalances,
};

#[derive(Accounts)]
pub struct MarketView<'info> {
    pub market: Account<'info, Market>,
}

impl<'info> MarketView<'info> {
    pub fn market_info(&self) -> Result<MarketInfo> {
        self.market.info()
    }

    pub fn spot_price(&self, outcome: Outcome) -> Result<u128> {
        self.market.spot_price(outcome)
    }

    pub fn marginal_price(&self, outcome: Outcome) -> Result<u128> {
        self.market.marginal_price(outcome)
    }

    /// Collateral a buy would charge, rounded up to a whole base unit
    pub fn cost_for_shares(&self, outcome: Outcome, shares: u128) -> Result<u128> {
        Ok(self.market.quote_buy(outcome, shares)?.wad)
    }

    /// Collateral a sell would pay, rounded down to a whole base unit
    pub fn return_for_shares(&self, outcome: Outcome, shares: u128) -> Result<u128> {
        Ok(self.market.quote_sell(outcome, shares)?.wad)
    }

    /// Curve reserve at the current supplies (unrounded to base units)
    pub fn required_collateral(&self) -> Result<u128> {
        PythagoreanCurve::required_collateral(
            self.market.yes_shares_total,
            self.market.no_shares_total,
        )
    }

    pub fn readiness(&self) -> Result<ResolutionReadiness> {
        let clock = Clock::get()?;
        Ok(MarketResolver::readiness(&self.market, clock.unix_timestamp))
    }
}

/// A holder's standing in one market
///
/// Pass the program id in place of `position` for a holder who never traded.
#[derive(Accounts)]
pub struct PositionView<'info> {
    pub market: Account<'info, Market>,

    /// CHECK: only used to match the position's owner
    pub user: UncheckedAccount<'info>,

    #[account(
        constraint = position.market == market.key(),
        constraint = position.owner == user.key(),
    )]
    pub position: Option<Account<'info, Position>>,
}

impl<'info> PositionView<'info> {
    fn position(&self) -> Option<&Position> {
        self.position.as_deref()
    }

    pub fn user_balances(&self) -> UserBalances {
        Market::user_balances(self.position())
    }

    pub fn redeemable_amount(&self) -> Result<u128> {
        self.market.redeemable_amount(self.position())
    }

    pub fn can_redeem(&self) -> bool {
        self.market.can_redeem(self.position())
    }

    pub fn position_value(&self) -> Result<PositionValue> {
        self.market.position_value(self.position())
    }
}

#[derive(Accounts)]
pub struct FactoryView<'info> {
    #[account(
        seeds = [MarketFactory::SEED],
        bump = factory.bump,
    )]
    pub factory: Account<'info, MarketFactory>,
}

impl<'info> FactoryView<'info> {
    /// Markets in creation order, one page starting at `start`
    pub fn all_markets(&self, start: u64) -> Vec<Pubkey> {
        self.factory
            .markets_page(&self.factory.key(), &crate::ID, start)
    }
}

#[derive(Accounts)]
pub struct ResolverView<'info> {
    #[account(
        seeds = [MarketResolver::SEED],
        bump = resolver.bump,
    )]
    pub resolver: Account<'info, MarketResolver>,
}

impl<'info> ResolverView<'info> {
    pub fn is_authorized(&self, reporter: Pubkey) -> bool {
        self.resolver.is_authorized(&reporter)
    }
}
