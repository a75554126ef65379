//! Prediction Market State
//!
//! Each market asks whether a tracked price series (an NFT collection floor,
//! for example) will finish above `target_price` at `resolution_timestamp`.
//!
//! ## Lifecycle
//!
//! ```text
//!   create_market ──▶ Open ──(buy / sell)──▶ Open
//!                       │
//!                       └──resolve──▶ Resolved ──(redeem)──▶ Resolved
//! ```
//!
//! The transition is one-way. Methods below only touch account data, never tokens;
//! handlers call them first and move tokens afterwards. A failed instruction
//! discards every account write, so an error halfway through leaves no trace.

use anchor_lang::prelude::*;

use crate::amm::wad::{collateral_scale, mul_div_floor};
use crate::amm::{CollateralAmount, PythagoreanCurve};
use crate::constants::{MAX_QUESTION_LEN, MAX_SLUG_LEN, WAD};
use crate::errors::MarketError;
use crate::state::Position;

/// Individual prediction market account
///
/// Seeds: ["market", factory, index.to_le_bytes()]
#[account]
#[derive(InitSpace, Debug)]
pub struct Market {
    /// Factory that deployed this market
    pub factory: Pubkey,

    /// Position in the factory's enumeration
    pub index: u64,

    /// Seeded the initial liquidity; may resolve the market
    pub creator: Pubkey,

    /// Delegated resolver (normally the MarketResolver account)
    pub resolver: Pubkey,

    /// Example: "Will BAYC floor price be > 30 SOL by Nov 1st?"
    #[max_len(MAX_QUESTION_LEN)]
    pub question: String,

    /// Identifier of the tracked price series
    #[max_len(MAX_SLUG_LEN)]
    pub collection_slug: String,

    /// sha256(collection_slug), locates the price feed
    pub asset_id: [u8; 32],

    /// YES wins if the final price is strictly above this (WAD)
    pub target_price: u128,

    /// Earliest unix timestamp at which the market may resolve
    pub resolution_timestamp: i64,

    pub created_at: i64,

    pub collateral_mint: Pubkey,

    pub collateral_decimals: u8,

    /// Outstanding YES shares (WAD)
    pub yes_shares_total: u128,

    /// Outstanding NO shares (WAD)
    pub no_shares_total: u128,

    /// Collateral held by the vault, in WAD
    pub collateral_balance: u128,

    pub status: MarketStatus,

    /// Set exactly once, at resolution
    pub winning_outcome: Option<Outcome>,

    /// Set exactly once, at resolution (WAD)
    pub final_reported_price: Option<u128>,

    pub resolved_at: Option<i64>,

    /// PDA bump seed
    pub bump: u8,
}

/// Market lifecycle status
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum MarketStatus {
    /// Market is open for trading
    #[default]
    Open,
    /// Market has been resolved
    Resolved,
}

/// Outcome share class
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum Outcome {
    Yes,
    No,
}

/// Immutable terms a market is created with
#[derive(Clone, Debug)]
pub struct MarketTerms {
    pub question: String,
    pub collection_slug: String,
    pub target_price: u128,
    pub resolution_timestamp: i64,
}

impl MarketTerms {
    pub fn validate(&self, now: i64) -> Result<()> {
        require!(
            self.question.len() <= MAX_QUESTION_LEN,
            MarketError::QuestionTooLong
        );
        require!(
            self.collection_slug.len() <= MAX_SLUG_LEN,
            MarketError::SlugTooLong
        );
        require!(
            self.resolution_timestamp > now,
            MarketError::InvalidResolutionTime
        );
        Ok(())
    }
}

/// Result of seeding a new market
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquiditySeed {
    pub collateral: CollateralAmount,
    /// Minted to the creator on each side
    pub shares: u128,
}

/// Result of a redemption
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redemption {
    pub shares: u128,
    pub collateral: CollateralAmount,
}

/// Full snapshot returned by `get_market_info`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct MarketInfo {
    pub question: String,
    pub collection_slug: String,
    pub target_price: u128,
    pub resolution_timestamp: i64,
    pub status: MarketStatus,
    pub winning_outcome: Option<Outcome>,
    pub final_reported_price: Option<u128>,
    pub yes_shares_total: u128,
    pub no_shares_total: u128,
    pub collateral_balance: u128,
    pub spot_price_yes: u128,
    pub spot_price_no: u128,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UserBalances {
    pub yes_shares: u128,
    pub no_shares: u128,
}

/// Mark-to-market value of a holder's shares (WAD collateral)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PositionValue {
    pub yes_value: u128,
    pub no_value: u128,
    pub total_value: u128,
}

impl Market {
    pub const SEED: &'static [u8] = b"market";

    pub fn is_open(&self) -> bool {
        self.status == MarketStatus::Open
    }

    pub fn is_resolved(&self) -> bool {
        self.status == MarketStatus::Resolved
    }

    /// WAD value of one collateral base unit
    pub fn collateral_scale(&self) -> Result<u128> {
        collateral_scale(self.collateral_decimals)
    }

    /// (target side supply, other side supply)
    pub fn supplies(&self, outcome: Outcome) -> (u128, u128) {
        match outcome {
            Outcome::Yes => (self.yes_shares_total, self.no_shares_total),
            Outcome::No => (self.no_shares_total, self.yes_shares_total),
        }
    }

    fn supply_mut(&mut self, outcome: Outcome) -> &mut u128 {
        match outcome {
            Outcome::Yes => &mut self.yes_shares_total,
            Outcome::No => &mut self.no_shares_total,
        }
    }

    fn require_open(&self) -> Result<()> {
        require!(self.is_open(), MarketError::MarketAlreadyResolved);
        Ok(())
    }

    /// Creator or delegated resolver
    pub fn is_authorized_resolver(&self, caller: &Pubkey) -> bool {
        *caller == self.creator || *caller == self.resolver
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Bootstrap liquidity: equal YES/NO supply, all credited to the creator
    pub fn seed_liquidity(
        &mut self,
        creator_position: &mut Position,
        liquidity_units: u64,
    ) -> Result<LiquiditySeed> {
        self.require_open()?;
        require!(liquidity_units > 0, MarketError::InsufficientLiquidity);

        let collateral = CollateralAmount::from_units(liquidity_units, self.collateral_scale()?)?;
        let shares = PythagoreanCurve::seed_supply(collateral.wad)?;
        require!(shares > 0, MarketError::InsufficientLiquidity);

        for outcome in [Outcome::Yes, Outcome::No] {
            let supply = self.supply_mut(outcome);
            *supply = supply.checked_add(shares).ok_or(MarketError::MathOverflow)?;
            creator_position.credit(outcome, shares)?;
        }
        self.collateral_balance = self
            .collateral_balance
            .checked_add(collateral.wad)
            .ok_or(MarketError::MathOverflow)?;

        Ok(LiquiditySeed { collateral, shares })
    }

    /// Mint `shares` of `outcome` to `position`, charging at most `max_payment_units`
    ///
    /// Returns the collateral actually charged, rounded up to a whole base unit.
    pub fn buy(
        &mut self,
        position: &mut Position,
        outcome: Outcome,
        shares: u128,
        max_payment_units: u64,
    ) -> Result<CollateralAmount> {
        self.require_open()?;

        let cost = self.quote_buy(outcome, shares)?;
        require!(
            cost.units <= max_payment_units,
            MarketError::InsufficientPayment
        );

        let supply = self.supply_mut(outcome);
        *supply = supply.checked_add(shares).ok_or(MarketError::MathOverflow)?;
        position.credit(outcome, shares)?;
        self.collateral_balance = self
            .collateral_balance
            .checked_add(cost.wad)
            .ok_or(MarketError::MathOverflow)?;

        Ok(cost)
    }

    /// Burn `shares` of `outcome` from `position`
    ///
    /// Returns the collateral owed to the seller. A sale worth less than one
    /// collateral base unit is refused with `NoOpTrade`.
    pub fn sell(
        &mut self,
        position: &mut Position,
        outcome: Outcome,
        shares: u128,
    ) -> Result<CollateralAmount> {
        self.require_open()?;
        require!(shares > 0, MarketError::NoOpTrade);
        require!(
            position.balance(outcome) >= shares,
            MarketError::InsufficientBalance
        );

        // dust that rounds to no base units would burn shares for nothing
        let proceeds = self.quote_sell(outcome, shares)?;
        require!(proceeds.units > 0, MarketError::NoOpTrade);

        position.debit(outcome, shares)?;
        let supply = self.supply_mut(outcome);
        *supply = supply.checked_sub(shares).ok_or(MarketError::MathOverflow)?;
        self.collateral_balance = self
            .collateral_balance
            .checked_sub(proceeds.wad)
            .ok_or(MarketError::MathOverflow)?;

        Ok(proceeds)
    }

    /// Fix the outcome: YES wins iff `final_price > target_price`
    pub fn resolve(&mut self, caller: &Pubkey, final_price: u128, now: i64) -> Result<Outcome> {
        self.require_open()?;
        require!(
            self.is_authorized_resolver(caller),
            MarketError::Unauthorized
        );
        require!(
            now >= self.resolution_timestamp,
            MarketError::ResolutionTimeNotPassed
        );

        let winner = if final_price > self.target_price {
            Outcome::Yes
        } else {
            Outcome::No
        };

        self.final_reported_price = Some(final_price);
        self.winning_outcome = Some(winner);
        self.resolved_at = Some(now);
        self.status = MarketStatus::Resolved;

        Ok(winner)
    }

    /// Burn winning shares for 1 collateral unit each
    ///
    /// `amount = None` redeems the whole winning balance. Amounts worth less
    /// than one collateral base unit are refused with `NoOpTrade`.
    pub fn redeem(&mut self, position: &mut Position, amount: Option<u128>) -> Result<Redemption> {
        let winner = self.winner()?;

        let balance = position.balance(winner);
        require!(balance > 0, MarketError::NothingToRedeem);

        let shares = match amount {
            None => balance,
            Some(requested) => {
                require!(requested > 0, MarketError::NoOpTrade);
                require!(requested <= balance, MarketError::InsufficientBalance);
                requested
            }
        };

        let collateral = CollateralAmount::payout(shares, self.collateral_scale()?)?;
        require!(collateral.units > 0, MarketError::NoOpTrade);

        position.debit(winner, shares)?;
        let supply = self.supply_mut(winner);
        *supply = supply.checked_sub(shares).ok_or(MarketError::MathOverflow)?;
        self.collateral_balance = self
            .collateral_balance
            .checked_sub(collateral.wad)
            .ok_or(MarketError::MathOverflow)?;

        Ok(Redemption { shares, collateral })
    }

    // ------------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------------

    fn winner(&self) -> Result<Outcome> {
        require!(self.is_resolved(), MarketError::MarketNotResolved);
        self.winning_outcome
            .ok_or_else(|| error!(MarketError::MarketNotResolved))
    }

    /// Collateral a buy of `shares` would charge, rounded up to a base unit
    pub fn quote_buy(&self, outcome: Outcome, shares: u128) -> Result<CollateralAmount> {
        let (target, other) = self.supplies(outcome);
        let cost = PythagoreanCurve::cost_for_shares(target, other, shares)?;
        CollateralAmount::charge(cost, self.collateral_scale()?)
    }

    /// Collateral a sell of `shares` would pay, rounded down to a base unit
    pub fn quote_sell(&self, outcome: Outcome, shares: u128) -> Result<CollateralAmount> {
        let (target, other) = self.supplies(outcome);
        let proceeds = PythagoreanCurve::return_for_shares(target, other, shares)?;
        CollateralAmount::payout(proceeds, self.collateral_scale()?)
    }

    pub fn spot_price(&self, outcome: Outcome) -> Result<u128> {
        let (target, other) = self.supplies(outcome);
        PythagoreanCurve::spot_price(target, other)
    }

    pub fn marginal_price(&self, outcome: Outcome) -> Result<u128> {
        let (target, other) = self.supplies(outcome);
        PythagoreanCurve::marginal_price(target, other)
    }

    pub fn info(&self) -> Result<MarketInfo> {
        let (spot_price_yes, spot_price_no) =
            PythagoreanCurve::spot_prices(self.yes_shares_total, self.no_shares_total)?;

        Ok(MarketInfo {
            question: self.question.clone(),
            collection_slug: self.collection_slug.clone(),
            target_price: self.target_price,
            resolution_timestamp: self.resolution_timestamp,
            status: self.status,
            winning_outcome: self.winning_outcome,
            final_reported_price: self.final_reported_price,
            yes_shares_total: self.yes_shares_total,
            no_shares_total: self.no_shares_total,
            collateral_balance: self.collateral_balance,
            spot_price_yes,
            spot_price_no,
        })
    }

    pub fn user_balances(position: Option<&Position>) -> UserBalances {
        position.map_or_else(UserBalances::default, |p| UserBalances {
            yes_shares: p.yes_shares,
            no_shares: p.no_shares,
        })
    }

    /// Collateral `redeem()` would pay right now (zero before resolution)
    pub fn redeemable_amount(&self, position: Option<&Position>) -> Result<u128> {
        let (Some(winner), Some(position)) = (self.winning_outcome, position) else {
            return Ok(0);
        };
        let payout = CollateralAmount::payout(position.balance(winner), self.collateral_scale()?)?;
        Ok(payout.wad)
    }

    /// True when `redeem()` would pay out at least one base unit
    pub fn can_redeem(&self, position: Option<&Position>) -> bool {
        self.is_resolved()
            && self
                .redeemable_amount(position)
                .map_or(false, |amount| amount > 0)
    }

    /// Before resolution shares are marked at spot; after, winners at 1 and losers at 0
    pub fn position_value(&self, position: Option<&Position>) -> Result<PositionValue> {
        let balances = Self::user_balances(position);

        let (yes_value, no_value) = match self.winning_outcome {
            Some(Outcome::Yes) => (balances.yes_shares, 0),
            Some(Outcome::No) => (0, balances.no_shares),
            None => {
                let (yes_price, no_price) =
                    PythagoreanCurve::spot_prices(self.yes_shares_total, self.no_shares_total)?;
                (
                    mul_div_floor(balances.yes_shares, yes_price, WAD)?,
                    mul_div_floor(balances.no_shares, no_price, WAD)?,
                )
            }
        };

        Ok(PositionValue {
            yes_value,
            no_value,
            total_value: yes_value
                .checked_add(no_value)
                .ok_or(MarketError::MathOverflow)?,
        })
    }
}
