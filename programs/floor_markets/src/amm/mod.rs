//! # Outcome Share Pricing
//!
//! Markets hold collateral equal to the length of the supply vector:
//!
//! ```text
//!   R(YES, NO) = √(YES² + NO²)
//!
//!   buy s YES:   (y, n) ──▶ (y + s, n)    pay  R' − R
//!   sell s YES:  (y, n) ──▶ (y − s, n)    get  R − R'
//! ```
//!
//! Only one side ever redeems, and `R ≥ max(YES, NO)`, so the vault always
//! covers the winners at one unit per share.
//!
//! Arithmetic lives in [`wad`]; the curve itself in [`bonding_curve`].

pub mod bonding_curve;
pub mod wad;

pub use bonding_curve::*;
pub use wad::CollateralAmount;
