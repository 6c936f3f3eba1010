//! Errors that can occur when checking consensus rules.
//!
//! Each error variant corresponds to a consensus rule, so enumerating
//! all possible verification failures enumerates the consensus rules we
//! implement, and ensures that we don't reject blocks or transactions
//! for a non-enumerated reason.

use thiserror::Error;

use mkt_chain::{block, work::difficulty::CompactDifficulty};

/// A proof-of-work check failure.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum PowError {
    #[error("difficulty threshold {0:?} is negative, zero, or out of range")]
    BadRange(CompactDifficulty),

    #[error("block hash {hash:?} is easier than its difficulty threshold {difficulty_threshold:?}")]
    HashExceedsTarget {
        hash: block::Hash,
        difficulty_threshold: CompactDifficulty,
    },
}
