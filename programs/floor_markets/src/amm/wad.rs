//! # WAD Fixed-Point Helpers
//!
//! Shares, prices and collateral are `u128` values scaled by 10^18. Products of two
//! WAD values do not fit in 128 bits, so every multiply-then-reduce step goes through
//! a 256-bit intermediate.
//!
//! ## Token boundary
//!
//! ```text
//! 1 collateral base unit = 10^(18 - mint.decimals) WAD
//!
//!   charges  -> rounded UP   to a whole base unit
//!   payouts  -> rounded DOWN to a whole base unit
//! ```
//!
//! Both directions favor the market, so the vault always holds at least what the
//! accounting says it holds.

use anchor_lang::prelude::*;

use crate::amm::AmmError;
use crate::constants::MAX_COLLATERAL_DECIMALS;
use crate::errors::MarketError;

#[allow(clippy::assign_op_pattern, clippy::ptr_offset_with_cast)]
mod u256 {
    uint::construct_uint! {
        pub struct U256(4);
    }
}

pub use u256::U256;

/// Narrow a 256-bit intermediate back to `u128`
pub fn to_u128(value: U256) -> Result<u128> {
    require!(value <= U256::from(u128::MAX), AmmError::Overflow);
    Ok(value.as_u128())
}

/// Integer square root using Newton's method
///
/// Computes floor(√x); the iteration is the same `z = (x/z + z) / 2` refinement,
/// widened to 256 bits so squared WAD supplies fit.
pub fn sqrt_floor(x: U256) -> U256 {
    if x.is_zero() {
        return U256::zero();
    }

    let two = U256::from(2u8);

    // (x + 1) / 2 without overflowing at U256::MAX
    let mut z = x / two + x % two;
    let mut y = x;

    while z < y {
        y = z;
        z = (x / z + z) / two;
    }

    y
}

/// ceil(√x)
pub fn sqrt_ceil(x: U256) -> U256 {
    let root = sqrt_floor(x);
    if root * root < x {
        root + U256::one()
    } else {
        root
    }
}

fn sum_of_squares(a: u128, b: u128) -> Result<U256> {
    let a = U256::from(a);
    let b = U256::from(b);
    (a * a).checked_add(b * b).ok_or_else(|| error!(AmmError::Overflow))
}

/// floor(√(a² + b²))
pub fn hypot_floor(a: u128, b: u128) -> Result<u128> {
    to_u128(sqrt_floor(sum_of_squares(a, b)?))
}

/// ceil(√(a² + b²))
pub fn hypot_ceil(a: u128, b: u128) -> Result<u128> {
    to_u128(sqrt_ceil(sum_of_squares(a, b)?))
}

/// floor(a * b / c)
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Result<u128> {
    require!(c > 0, AmmError::DivisionByZero);
    to_u128(U256::from(a) * U256::from(b) / U256::from(c))
}

/// WAD value of one collateral base unit for a mint with `decimals`
pub fn collateral_scale(decimals: u8) -> Result<u128> {
    require!(
        decimals <= MAX_COLLATERAL_DECIMALS,
        MarketError::InvalidCollateralMint
    );
    Ok(10u128.pow(u32::from(MAX_COLLATERAL_DECIMALS - decimals)))
}

/// A collateral amount that can actually move through the token program
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollateralAmount {
    /// Accounting value (always a whole multiple of the mint's scale)
    pub wad: u128,
    /// Token base units transferred
    pub units: u64,
}

impl CollateralAmount {
    pub fn from_units(units: u64, scale: u128) -> Result<Self> {
        let wad = u128::from(units)
            .checked_mul(scale)
            .ok_or(AmmError::Overflow)?;
        Ok(Self { wad, units })
    }

    /// Smallest transferable amount covering `wad`
    pub fn charge(wad: u128, scale: u128) -> Result<Self> {
        require!(scale > 0, AmmError::DivisionByZero);
        let mut units = wad / scale;
        if wad % scale != 0 {
            units += 1;
        }
        let units = u64::try_from(units).map_err(|_| error!(AmmError::Overflow))?;
        Self::from_units(units, scale)
    }

    /// Largest transferable amount not exceeding `wad`
    pub fn payout(wad: u128, scale: u128) -> Result<Self> {
        require!(scale > 0, AmmError::DivisionByZero);
        let units = u64::try_from(wad / scale).map_err(|_| error!(AmmError::Overflow))?;
        Self::from_units(units, scale)
    }
}
