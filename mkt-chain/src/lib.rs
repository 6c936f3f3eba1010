//! Core data structures for MktCoin proof-of-work consensus.
//!
//! This crate holds the consensus-critical arithmetic that every node must
//! reproduce bit-for-bit:
//!   - the compact ("nBits") difficulty encoding and its 256-bit expansion,
//!   - the work represented by a difficulty threshold, and
//!   - the per-network parameters consumed by difficulty adjustment.
//!
//! It also defines the [`chain_history::ChainHistory`] capability that block
//! storage implementations provide to the difficulty adjustment code.

#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate serde;

pub mod block;
pub mod chain_history;
pub mod parameters;
pub mod work;
