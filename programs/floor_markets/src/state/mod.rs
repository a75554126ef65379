//! State structures for the prediction market protocol

pub mod factory;
pub mod market;
pub mod position;
pub mod price_feed;
pub mod resolver;

pub use factory::*;
pub use market::*;
pub use position::*;
pub use price_feed::*;
pub use resolver::*;
