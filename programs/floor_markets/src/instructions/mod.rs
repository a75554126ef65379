//! Instruction handlers for the prediction market protocol
//!
//! Each instruction represents an action users can take:
//! - `initialize` - Set up the factory and the resolver (once)
//! - `create_market` - Create a new prediction market (permissionless)
//! - `trade` - Buy/sell outcome shares
//! - `resolve` - Creator settles the market with the final price
//! - `resolver` - Allow-list, reporter and oracle resolution, price feeds
//! - `redeem` - Claim winnings after resolution
//! - `views` - Read-only queries

pub mod create_market;
pub mod initialize;
pub mod redeem;
pub mod resolve;
pub mod resolver;
pub mod trade;
pub mod vault;
pub mod views;

pub use create_market::*;
pub use initialize::*;
pub use redeem::*;
pub use resolve::*;
pub use resolver::*;
pub use trade::*;
pub use views::*;
