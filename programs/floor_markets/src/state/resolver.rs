//! Market Resolver
//!
//! Gatekeeper for resolution. Markets delegate to this account, which lets
//! through either a price typed in by an allow-listed reporter or the price
//! published on the market's [`PriceFeed`](crate::state::PriceFeed).
//!
//! ```text
//!   reporter ──resolve_market_manual(price)──┐
//!                                            ├──▶ Market::resolve
//!   anyone ───resolve_market_from_oracle()───┘      (as delegated resolver)
//!                  │
//!                  └── PriceOracle::final_price(asset_id)
//! ```

use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_MAX_PRICE_AGE, MAX_AUTHORIZED_RESOLVERS};
use crate::errors::MarketError;
use crate::state::{Market, Outcome, PriceOracle};

/// Resolver configuration (singleton PDA)
///
/// Seeds: ["market_resolver"]
#[account]
#[derive(InitSpace, Debug)]
pub struct MarketResolver {
    /// Manages the allow-list
    pub owner: Pubkey,

    /// Authority allowed to publish price feeds
    pub oracle: Pubkey,

    /// Oldest acceptable oracle observation, in seconds
    pub max_price_age: i64,

    /// Reporters allowed to resolve with a manual price
    #[max_len(MAX_AUTHORIZED_RESOLVERS)]
    pub authorized: Vec<Pubkey>,

    /// PDA bump seed
    pub bump: u8,
}

/// Answer to `is_market_ready_for_resolution`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ResolutionReadiness {
    pub ready: bool,
    pub reason: String,
}

impl MarketResolver {
    pub const SEED: &'static [u8] = b"market_resolver";

    pub fn configure(owner: Pubkey, oracle: Pubkey, max_price_age: i64, bump: u8) -> Self {
        Self {
            owner,
            oracle,
            max_price_age: if max_price_age > 0 {
                max_price_age
            } else {
                DEFAULT_MAX_PRICE_AGE
            },
            authorized: Vec::new(),
            bump,
        }
    }

    pub fn is_authorized(&self, reporter: &Pubkey) -> bool {
        self.authorized.contains(reporter)
    }

    /// Returns false if `reporter` was already on the list
    pub fn authorize(&mut self, caller: &Pubkey, reporter: Pubkey) -> Result<bool> {
        require_keys_eq!(*caller, self.owner, MarketError::Unauthorized);
        if self.is_authorized(&reporter) {
            return Ok(false);
        }
        require!(
            self.authorized.len() < MAX_AUTHORIZED_RESOLVERS,
            MarketError::TooManyResolvers
        );
        self.authorized.push(reporter);
        Ok(true)
    }

    /// Returns false if `reporter` was not on the list
    pub fn revoke(&mut self, caller: &Pubkey, reporter: &Pubkey) -> Result<bool> {
        require_keys_eq!(*caller, self.owner, MarketError::Unauthorized);
        let before = self.authorized.len();
        self.authorized.retain(|key| key != reporter);
        Ok(self.authorized.len() != before)
    }

    pub fn readiness(market: &Market, now: i64) -> ResolutionReadiness {
        let (ready, reason) = if !market.is_open() {
            (false, "Market already resolved")
        } else if now < market.resolution_timestamp {
            (false, "Resolution time not reached")
        } else {
            (true, "Ready for resolution")
        };
        ResolutionReadiness {
            ready,
            reason: reason.to_string(),
        }
    }

    fn require_ready(market: &Market, now: i64) -> Result<()> {
        require!(market.is_open(), MarketError::MarketAlreadyResolved);
        require!(
            now >= market.resolution_timestamp,
            MarketError::ResolutionTimeNotPassed
        );
        Ok(())
    }

    /// Resolve with a reporter-supplied price
    ///
    /// `resolver_key` is this account's address, which the market knows as its
    /// delegated resolver.
    pub fn resolve_manual(
        &self,
        resolver_key: &Pubkey,
        reporter: &Pubkey,
        market: &mut Market,
        final_price: u128,
        now: i64,
    ) -> Result<Outcome> {
        require!(self.is_authorized(reporter), MarketError::Unauthorized);
        Self::require_ready(market, now)?;
        market.resolve(resolver_key, final_price, now)
    }

    /// Validate an oracle reading for `market`
    pub fn accept_observation<O: PriceOracle>(
        &self,
        market: &Market,
        oracle: &O,
        now: i64,
    ) -> Result<u128> {
        let observation = oracle.final_price(&market.asset_id)?;

        require!(observation.is_valid, MarketError::OracleDataInvalid);
        require!(
            observation.observed_at >= market.resolution_timestamp,
            MarketError::OracleDataStale
        );
        let age = now.saturating_sub(observation.observed_at);
        require!(age <= self.max_price_age, MarketError::OracleDataStale);

        Ok(observation.price)
    }

    /// Resolve with the oracle's price; the caller only chooses when
    pub fn resolve_from_oracle<O: PriceOracle>(
        &self,
        resolver_key: &Pubkey,
        market: &mut Market,
        oracle: &O,
        now: i64,
    ) -> Result<(Outcome, u128)> {
        Self::require_ready(market, now)?;
        let price = self.accept_observation(market, oracle, now)?;
        let winner = market.resolve(resolver_key, price, now)?;
        Ok((winner, price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WAD;
    use crate::state::{MarketStatus, Position, PriceObservation};

    const DEADLINE: i64 = 10_000;

    struct FixedOracle(PriceObservation);

    impl PriceOracle for FixedOracle {
        fn final_price(&self, _asset_id: &[u8; 32]) -> Result<PriceObservation> {
            Ok(self.0)
        }
    }

    fn resolver() -> (Pubkey, MarketResolver) {
        let owner = Pubkey::new_unique();
        (owner, MarketResolver::configure(owner, Pubkey::new_unique(), 600, 255))
    }

    fn market(resolver_key: Pubkey) -> Market {
        Market {
            factory: Pubkey::new_unique(),
            index: 3,
            creator: Pubkey::new_unique(),
            resolver: resolver_key,
            question: "Resolver Test Market".to_string(),
            collection_slug: "test-collection".to_string(),
            asset_id: [9u8; 32],
            target_price: 20 * WAD,
            resolution_timestamp: DEADLINE,
            created_at: 0,
            collateral_mint: Pubkey::new_unique(),
            collateral_decimals: 18,
            yes_shares_total: 0,
            no_shares_total: 0,
            collateral_balance: 0,
            status: MarketStatus::Open,
            winning_outcome: None,
            final_reported_price: None,
            resolved_at: None,
            bump: 250,
        }
    }

    #[test]
    fn test_default_price_age() {
        let resolver = MarketResolver::configure(Pubkey::new_unique(), Pubkey::new_unique(), 0, 1);
        assert_eq!(resolver.max_price_age, DEFAULT_MAX_PRICE_AGE);
    }

    #[test]
    fn test_allow_list_is_owner_gated() {
        let (owner, mut resolver) = resolver();
        let reporter = Pubkey::new_unique();

        let err = resolver.authorize(&reporter, reporter).unwrap_err();
        assert_eq!(err, MarketError::Unauthorized.into());

        assert!(resolver.authorize(&owner, reporter).unwrap());
        assert!(!resolver.authorize(&owner, reporter).unwrap());
        assert!(resolver.is_authorized(&reporter));
        assert_eq!(resolver.authorized.len(), 1);

        assert!(resolver.revoke(&owner, &reporter).unwrap());
        assert!(!resolver.revoke(&owner, &reporter).unwrap());
        assert!(!resolver.is_authorized(&reporter));
    }

    #[test]
    fn test_allow_list_capacity() {
        let (owner, mut resolver) = resolver();
        for _ in 0..MAX_AUTHORIZED_RESOLVERS {
            resolver.authorize(&owner, Pubkey::new_unique()).unwrap();
        }
        let err = resolver.authorize(&owner, Pubkey::new_unique()).unwrap_err();
        assert_eq!(err, MarketError::TooManyResolvers.into());
    }

    #[test]
    fn test_readiness() {
        let resolver_key = Pubkey::new_unique();
        let mut market = market(resolver_key);

        let early = MarketResolver::readiness(&market, DEADLINE - 1);
        assert!(!early.ready);
        assert_eq!(early.reason, "Resolution time not reached");

        assert!(MarketResolver::readiness(&market, DEADLINE).ready);

        market.resolve(&resolver_key, WAD, DEADLINE).unwrap();
        let done = MarketResolver::readiness(&market, DEADLINE + 1);
        assert!(!done.ready);
        assert_eq!(done.reason, "Market already resolved");
    }

    #[test]
    fn test_manual_resolution_requires_reporter() {
        let resolver_key = Pubkey::new_unique();
        let (owner, mut resolver) = resolver();
        let reporter = Pubkey::new_unique();
        let mut market = market(resolver_key);

        let err = resolver
            .resolve_manual(&resolver_key, &reporter, &mut market, 25 * WAD, DEADLINE)
            .unwrap_err();
        assert_eq!(err, MarketError::Unauthorized.into());

        resolver.authorize(&owner, reporter).unwrap();
        let err = resolver
            .resolve_manual(&resolver_key, &reporter, &mut market, 25 * WAD, DEADLINE - 5)
            .unwrap_err();
        assert_eq!(err, MarketError::ResolutionTimeNotPassed.into());

        let winner = resolver
            .resolve_manual(&resolver_key, &reporter, &mut market, 25 * WAD, DEADLINE)
            .unwrap();
        assert_eq!(winner, Outcome::Yes);
        assert!(market.is_resolved());
    }

    #[test]
    fn test_manual_resolution_needs_delegation() {
        let (owner, mut resolver) = resolver();
        let reporter = Pubkey::new_unique();
        resolver.authorize(&owner, reporter).unwrap();

        // market delegated to some other resolver
        let mut market = market(Pubkey::new_unique());
        let err = resolver
            .resolve_manual(&Pubkey::new_unique(), &reporter, &mut market, WAD, DEADLINE)
            .unwrap_err();
        assert_eq!(err, MarketError::Unauthorized.into());
    }

    #[test]
    fn test_oracle_resolution() {
        let resolver_key = Pubkey::new_unique();
        let (_, resolver) = resolver();
        let mut market = market(resolver_key);

        let oracle = FixedOracle(PriceObservation {
            price: 15 * WAD,
            observed_at: DEADLINE + 30,
            is_valid: true,
        });
        let (winner, price) = resolver
            .resolve_from_oracle(&resolver_key, &mut market, &oracle, DEADLINE + 60)
            .unwrap();
        assert_eq!((winner, price), (Outcome::No, 15 * WAD));
        assert_eq!(market.final_reported_price, Some(15 * WAD));

        let mut holder = Position::default();
        assert!(!market.can_redeem(Some(&holder)));
        holder.no_shares = WAD;
        assert!(market.can_redeem(Some(&holder)));
    }

    #[test]
    fn test_oracle_rejections() {
        let resolver_key = Pubkey::new_unique();
        let (_, resolver) = resolver();
        let market = market(resolver_key);
        let now = DEADLINE + 1_000;

        let invalid = FixedOracle(PriceObservation {
            price: 30 * WAD,
            observed_at: now,
            is_valid: false,
        });
        let err = resolver.accept_observation(&market, &invalid, now).unwrap_err();
        assert_eq!(err, MarketError::OracleDataInvalid.into());

        let too_old = FixedOracle(PriceObservation {
            price: 30 * WAD,
            observed_at: now - 601,
            is_valid: true,
        });
        let err = resolver.accept_observation(&market, &too_old, now).unwrap_err();
        assert_eq!(err, MarketError::OracleDataStale.into());

        let before_deadline = FixedOracle(PriceObservation {
            price: 30 * WAD,
            observed_at: DEADLINE - 1,
            is_valid: true,
        });
        let err = resolver
            .accept_observation(&market, &before_deadline, DEADLINE + 10)
            .unwrap_err();
        assert_eq!(err, MarketError::OracleDataStale.into());
    }
}
