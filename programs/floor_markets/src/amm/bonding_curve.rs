//! # Pythagorean Bonding Curve
//!
//! ## Reserve
//!
//! ```text
//!   R(YES, NO) = √(YES² + NO²)
//!
//!   YES, NO   outstanding shares per side (WAD)
//!   R         collateral the market must hold for those supplies
//! ```
//!
//! ## Pricing a trade
//!
//! Buying `s` shares of one side moves the state along that axis, the other
//! side fixed. The trader pays the change in `R`:
//!
//! ```text
//! cost(s)   = R(t + s, u) - R(t, u)      rounded up
//! return(s) = R(t, u) - R(t - s, u)      rounded down
//! ```
//!
//! `R` is a potential function, so a buy followed by the same-sized sell nets
//! the trader nothing (minus rounding), whatever happened in between.
//!
//! ## Why this curve can promise 1 unit per winning share
//!
//! ```text
//! R(YES, NO) = √(YES² + NO²) ≥ max(YES, NO)
//! ```
//!
//! The market always holds at least `R`, and only one side ever gets redeemed,
//! so every winning share is covered at 1 collateral unit.
//!
//! ## Displayed price
//!
//! The quoted spot price is the proportional share of supply,
//! `YES / (YES + NO)`, which orders identically to the curve's marginal price
//! `YES / R` and reads as a probability (0.5 / 0.5 for a balanced market).

use anchor_lang::prelude::*;

use crate::amm::wad::{hypot_ceil, hypot_floor, mul_div_floor, sqrt_floor, to_u128, U256};
use crate::constants::{HALF_WAD, WAD};
use crate::errors::MarketError;

/// Errors specific to the Pythagorean bonding curve
#[error_code(offset = 7000)]
pub enum AmmError {
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Division by zero")]
    DivisionByZero,
    #[msg("Cannot burn more shares than supply")]
    InsufficientSupply,
}

/// Pythagorean Bonding Curve for Prediction Markets
///
/// Implements R = √(YES² + NO²). All inputs and outputs are WAD.
pub struct PythagoreanCurve;

impl PythagoreanCurve {
    /// Collateral the curve requires at the given supplies, rounded up
    ///
    /// A solvent market holds at least this much.
    pub fn required_collateral(yes_supply: u128, no_supply: u128) -> Result<u128> {
        hypot_ceil(yes_supply, no_supply)
    }

    /// Equal YES/NO supply backed by `liquidity`
    ///
    /// Formula: s = √(L² / 2), so that R(s, s) = s·√2 ≤ L
    pub fn seed_supply(liquidity: u128) -> Result<u128> {
        let l = U256::from(liquidity);
        to_u128(sqrt_floor(l * l / U256::from(2u8)))
    }

    /// Spot price of the `target` side as a WAD fraction
    ///
    /// Price = target / (target + other), 0.5 when the market is empty
    ///
    /// # Example
    /// ```ignore
    /// let price = PythagoreanCurve::spot_price(3 * WAD, WAD)?;
    /// // price == 0.75 WAD
    /// ```
    pub fn spot_price(target_supply: u128, other_supply: u128) -> Result<u128> {
        let total = target_supply
            .checked_add(other_supply)
            .ok_or(AmmError::Overflow)?;
        if total == 0 {
            return Ok(HALF_WAD);
        }
        mul_div_floor(target_supply, WAD, total)
    }

    /// Spot prices for (YES, NO)
    pub fn spot_prices(yes_supply: u128, no_supply: u128) -> Result<(u128, u128)> {
        Ok((
            Self::spot_price(yes_supply, no_supply)?,
            Self::spot_price(no_supply, yes_supply)?,
        ))
    }

    /// Price of the next infinitesimal share: ∂R/∂t = t / R
    pub fn marginal_price(target_supply: u128, other_supply: u128) -> Result<u128> {
        let reserve = hypot_floor(target_supply, other_supply)?;
        if reserve == 0 {
            return Ok(HALF_WAD);
        }
        Ok(mul_div_floor(target_supply, WAD, reserve)?.min(WAD))
    }

    /// Collateral needed to mint `shares` of the target side
    ///
    /// Formula: ceil(R(t + s, u)) - floor(R(t, u))
    ///
    /// # Arguments
    /// * `target_supply` - Supply of the side being bought (t)
    /// * `other_supply` - Supply of the other side (u)
    /// * `shares` - Shares to mint (s)
    pub fn cost_for_shares(target_supply: u128, other_supply: u128, shares: u128) -> Result<u128> {
        require!(shares > 0, MarketError::NoOpTrade);

        let new_target = target_supply
            .checked_add(shares)
            .ok_or(AmmError::Overflow)?;

        let reserve_after = hypot_ceil(new_target, other_supply)?;
        let reserve_before = hypot_floor(target_supply, other_supply)?;

        reserve_after
            .checked_sub(reserve_before)
            .ok_or_else(|| error!(AmmError::Overflow))
    }

    /// Collateral released by burning `shares` of the target side
    ///
    /// Formula: floor(R(t, u)) - ceil(R(t - s, u))
    pub fn return_for_shares(
        target_supply: u128,
        other_supply: u128,
        shares: u128,
    ) -> Result<u128> {
        require!(shares > 0, MarketError::NoOpTrade);
        require!(shares <= target_supply, AmmError::InsufficientSupply);

        let new_target = target_supply - shares;

        let reserve_before = hypot_floor(target_supply, other_supply)?;
        let reserve_after = hypot_ceil(new_target, other_supply)?;

        Ok(reserve_before.saturating_sub(reserve_after))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: u128 = WAD;

    #[test]
    fn test_balanced_market_prices() {
        let seed = PythagoreanCurve::seed_supply(ONE).unwrap();
        let (yes_price, no_price) = PythagoreanCurve::spot_prices(seed, seed).unwrap();

        assert_eq!(yes_price, HALF_WAD);
        assert_eq!(no_price, HALF_WAD);
    }

    #[test]
    fn test_empty_market_price_is_even() {
        assert_eq!(PythagoreanCurve::spot_price(0, 0).unwrap(), HALF_WAD);
    }

    #[test]
    fn test_marginal_price_bounds() {
        let seed = PythagoreanCurve::seed_supply(ONE).unwrap();
        let balanced = PythagoreanCurve::marginal_price(seed, seed).unwrap();
        // 1/√2
        assert!(balanced > 707_106_781_000_000_000 && balanced < 707_106_782_000_000_000);

        let heavy = PythagoreanCurve::marginal_price(3 * ONE, ONE).unwrap();
        let light = PythagoreanCurve::marginal_price(ONE, 3 * ONE).unwrap();
        assert!(heavy > light);
        assert!(heavy < ONE);
        assert_eq!(PythagoreanCurve::marginal_price(ONE, 0).unwrap(), ONE);
    }

    #[test]
    fn test_seed_supply_is_backed() {
        for liquidity in [1u128, 7, ONE, 2 * ONE, 123_456_789 * ONE] {
            let seed = PythagoreanCurve::seed_supply(liquidity).unwrap();
            let required = PythagoreanCurve::required_collateral(seed, seed).unwrap();
            assert!(required <= liquidity, "seed of {liquidity} needs {required}");
        }

        // 1.0 collateral seeds ≈ 0.7071 shares per side
        assert_eq!(
            PythagoreanCurve::seed_supply(ONE).unwrap(),
            707_106_781_186_547_524
        );
    }

    #[test]
    fn test_buy_cost_positive_and_increasing() {
        let seed = PythagoreanCurve::seed_supply(ONE).unwrap();

        let mut last = 0;
        for shares in [1u128, ONE / 1000, ONE, 10 * ONE, 100 * ONE] {
            let cost = PythagoreanCurve::cost_for_shares(seed, seed, shares).unwrap();
            assert!(cost > last);
            last = cost;
        }
    }

    #[test]
    fn test_share_never_costs_a_full_unit() {
        let seed = PythagoreanCurve::seed_supply(ONE).unwrap();
        let shares = 10 * ONE;
        let cost = PythagoreanCurve::cost_for_shares(seed, seed, shares).unwrap();
        assert!(cost < shares);
    }

    #[test]
    fn test_zero_shares_rejected() {
        assert!(PythagoreanCurve::cost_for_shares(ONE, ONE, 0).is_err());
        assert!(PythagoreanCurve::return_for_shares(ONE, ONE, 0).is_err());
    }

    #[test]
    fn test_sell_beyond_supply_rejected() {
        let result = PythagoreanCurve::return_for_shares(ONE, ONE, ONE + 1);
        assert_eq!(result.unwrap_err(), AmmError::InsufficientSupply.into());
    }

    #[test]
    fn test_round_trip_never_pays_trader() {
        let (yes, no) = (5 * ONE, 3 * ONE);
        for shares in [1u128, 333, ONE / 7, ONE, 42 * ONE] {
            let cost = PythagoreanCurve::cost_for_shares(yes, no, shares).unwrap();
            let back = PythagoreanCurve::return_for_shares(yes + shares, no, shares).unwrap();
            assert!(back <= cost);
            // rounding costs at most a couple of wei
            assert!(cost - back <= 2);
        }
    }

    #[test]
    fn test_sell_returns_less_than_share_count() {
        let collateral_out =
            PythagoreanCurve::return_for_shares(8 * ONE, 6 * ONE, ONE / 2).unwrap();
        assert!(collateral_out > 0);
        assert!(collateral_out < ONE / 2);
    }

    #[test]
    fn test_reserve_covers_either_side() {
        let mut yes = PythagoreanCurve::seed_supply(ONE).unwrap();
        let mut no = yes;
        let mut collateral = ONE;

        let steps: [(bool, bool, u128); 8] = [
            (true, true, 10 * ONE),
            (false, true, 3 * ONE),
            (true, false, 4 * ONE),
            (false, true, ONE / 3),
            (true, true, 1),
            (false, false, 2 * ONE),
            (true, false, 6 * ONE),
            (false, false, ONE / 3),
        ];

        for (is_yes, is_buy, shares) in steps {
            let (target, other) = if is_yes { (yes, no) } else { (no, yes) };
            if is_buy {
                collateral += PythagoreanCurve::cost_for_shares(target, other, shares).unwrap();
            } else {
                collateral -= PythagoreanCurve::return_for_shares(target, other, shares).unwrap();
            }
            let updated = if is_buy { target + shares } else { target - shares };
            if is_yes {
                yes = updated;
            } else {
                no = updated;
            }

            let required = PythagoreanCurve::required_collateral(yes, no).unwrap();
            assert!(collateral >= required);
            assert!(collateral >= yes.max(no));
        }
    }
}
