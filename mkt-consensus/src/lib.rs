//! Implementation of MktCoin proof-of-work consensus checks.
//!
//! These checks are *semantic*: they only depend on the block header and the
//! network parameters, not on the chain state. Difficulty adjustment, which
//! depends on previous blocks, is a *contextual* check, and lives in
//! `mkt-state`.

#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

pub mod block;
pub mod error;

pub use block::check::check_proof_of_work;
pub use error::PowError;
