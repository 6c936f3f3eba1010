//! Contextual difficulty checks and chain state for MktCoin.
//!
//! The difficulty adjustment code reads block history through the
//! [`ChainHistory`](mkt_chain::chain_history::ChainHistory) capability, so it
//! works with any block storage. [`InMemoryChain`] is a simple height-indexed
//! implementation, used by tests and local tools.

#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

pub mod check;
mod config;
mod error;
mod in_memory;

pub use check::{difficulty::next_required_bits, difficulty_threshold_is_valid};
pub use config::Config;
pub use error::ValidateContextError;
pub use in_memory::InMemoryChain;
