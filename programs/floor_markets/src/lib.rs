//! # Floor Markets: Binary Prediction Markets on Price Thresholds
//!
//! Peer-to-peer YES/NO markets on questions like "will this collection's floor
//! price be above 30 SOL on Nov 1st?".
//!
//! ## Overview
//!
//! - A factory deploys markets; the creator seeds each one with collateral.
//! - Traders buy and sell outcome shares against an automated market maker.
//! - After the deadline the market is resolved with the final price, either by
//!   its creator, an allow-listed reporter, or the on-chain price feed.
//! - Each winning share redeems for exactly one unit of collateral.
//!
//! Read-only queries are instructions too; simulate them and read the return data.

use anchor_lang::prelude::*;

pub mod amm;
pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

pub use instructions::*;
pub use state::{MarketInfo, Outcome, PositionValue, ResolutionReadiness, UserBalances};

// Replace with your deployed program ID
declare_id!("7gJZghJ1x1ATtmCJobi1z8eG8UMiqaPretGfckgmw8gG");

#[program]
pub mod floor_markets {
    use super::*;

    // ------------------------------------------------------------------------
    // Setup
    // ------------------------------------------------------------------------

    /// Create the market resolver and its allow-list
    pub fn initialize_resolver(
        ctx: Context<InitializeResolver>,
        oracle: Pubkey,
        max_price_age: i64,
    ) -> Result<()> {
        ctx.accounts
            .initialize_resolver(oracle, max_price_age, &ctx.bumps)
    }

    /// Create the market factory
    pub fn initialize_factory(
        ctx: Context<InitializeFactory>,
        resolver: Pubkey,
        min_liquidity: u64,
    ) -> Result<()> {
        ctx.accounts
            .initialize_factory(resolver, min_liquidity, &ctx.bumps)
    }

    // ------------------------------------------------------------------------
    // Factory
    // ------------------------------------------------------------------------

    /// Deploy a new market seeded with `initial_liquidity` collateral base units
    pub fn create_market(
        ctx: Context<CreateMarket>,
        question: String,
        collection_slug: String,
        target_price: u128,
        resolution_timestamp: i64,
        initial_liquidity: u64,
    ) -> Result<Pubkey> {
        ctx.accounts.create_market(
            question,
            collection_slug,
            target_price,
            resolution_timestamp,
            initial_liquidity,
            &ctx.bumps,
        )
    }

    /// Market addresses in creation order, one page at a time
    pub fn get_all_markets(ctx: Context<FactoryView>, start: u64) -> Result<Vec<Pubkey>> {
        Ok(ctx.accounts.all_markets(start))
    }

    // ------------------------------------------------------------------------
    // Market
    // ------------------------------------------------------------------------

    /// Buy exactly `shares` of `outcome`; fails if the cost exceeds `max_payment`
    pub fn buy(
        ctx: Context<TradeShares>,
        outcome: Outcome,
        shares: u128,
        max_payment: u64,
    ) -> Result<u128> {
        ctx.accounts.buy(outcome, shares, max_payment, &ctx.bumps)
    }

    /// Sell `shares` of `outcome` back to the market
    pub fn sell(ctx: Context<TradeShares>, outcome: Outcome, shares: u128) -> Result<u128> {
        ctx.accounts.sell(outcome, shares)
    }

    /// Resolve directly as the market's creator
    pub fn resolve_market(ctx: Context<ResolveMarket>, final_price: u128) -> Result<()> {
        ctx.accounts.resolve_market(final_price)
    }

    /// Redeem every winning share
    pub fn redeem(ctx: Context<Redeem>) -> Result<u128> {
        ctx.accounts.redeem()
    }

    /// Redeem `amount` winning shares
    pub fn redeem_partial(ctx: Context<Redeem>, amount: u128) -> Result<u128> {
        ctx.accounts.redeem_partial(amount)
    }

    pub fn get_market_info(ctx: Context<MarketView>) -> Result<MarketInfo> {
        ctx.accounts.market_info()
    }

    pub fn get_spot_price(ctx: Context<MarketView>, outcome: Outcome) -> Result<u128> {
        ctx.accounts.spot_price(outcome)
    }

    pub fn get_marginal_price(ctx: Context<MarketView>, outcome: Outcome) -> Result<u128> {
        ctx.accounts.marginal_price(outcome)
    }

    pub fn get_cost_for_shares(
        ctx: Context<MarketView>,
        outcome: Outcome,
        shares: u128,
    ) -> Result<u128> {
        ctx.accounts.cost_for_shares(outcome, shares)
    }

    pub fn get_return_for_shares(
        ctx: Context<MarketView>,
        outcome: Outcome,
        shares: u128,
    ) -> Result<u128> {
        ctx.accounts.return_for_shares(outcome, shares)
    }

    pub fn get_required_collateral(ctx: Context<MarketView>) -> Result<u128> {
        ctx.accounts.required_collateral()
    }

    pub fn get_user_balances(ctx: Context<PositionView>) -> Result<UserBalances> {
        Ok(ctx.accounts.user_balances())
    }

    pub fn get_redeemable_amount(ctx: Context<PositionView>) -> Result<u128> {
        ctx.accounts.redeemable_amount()
    }

    pub fn can_redeem(ctx: Context<PositionView>) -> Result<bool> {
        Ok(ctx.accounts.can_redeem())
    }

    pub fn get_position_value(ctx: Context<PositionView>) -> Result<PositionValue> {
        ctx.accounts.position_value()
    }

    // ------------------------------------------------------------------------
    // Resolver
    // ------------------------------------------------------------------------

    /// Add a reporter to the allow-list (owner only)
    pub fn authorize_resolver(ctx: Context<ManageResolvers>, reporter: Pubkey) -> Result<()> {
        ctx.accounts.authorize_resolver(reporter)
    }

    /// Remove a reporter from the allow-list (owner only)
    pub fn revoke_resolver(ctx: Context<ManageResolvers>, reporter: Pubkey) -> Result<()> {
        ctx.accounts.revoke_resolver(reporter)
    }

    pub fn authorized_resolvers(ctx: Context<ResolverView>, reporter: Pubkey) -> Result<bool> {
        Ok(ctx.accounts.is_authorized(reporter))
    }

    pub fn is_market_ready_for_resolution(
        ctx: Context<MarketView>,
    ) -> Result<ResolutionReadiness> {
        ctx.accounts.readiness()
    }

    /// Resolve with a price reported by an allow-listed reporter
    pub fn resolve_market_manual(
        ctx: Context<ResolveMarketManual>,
        final_price: u128,
    ) -> Result<()> {
        ctx.accounts.resolve_market_manual(final_price)
    }

    /// Resolve with the market's published price feed (anyone may call)
    pub fn resolve_market_from_oracle(ctx: Context<ResolveMarketFromOracle>) -> Result<()> {
        ctx.accounts.resolve_market_from_oracle()
    }

    /// Publish the latest price for a collection (oracle authority only)
    pub fn publish_price(
        ctx: Context<PublishPrice>,
        asset_id: [u8; 32],
        collection_slug: String,
        price: u128,
        is_valid: bool,
    ) -> Result<()> {
        ctx.accounts
            .publish_price(asset_id, collection_slug, price, is_valid, &ctx.bumps)
    }
}
