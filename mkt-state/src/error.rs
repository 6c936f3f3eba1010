//! Error types for MktCoin's chain state.

use thiserror::Error;

use mkt_chain::{block, work::difficulty::CompactDifficulty};

/// An error describing why a block failed contextual validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum ValidateContextError {
    #[error(
        "block history is missing the ancestor at height {ancestor_height} \
         of the block at height {block_height:?}"
    )]
    #[non_exhaustive]
    MissingAncestor {
        block_height: block::Height,
        /// Can be negative, when the difficulty window reaches past genesis.
        ancestor_height: i64,
    },

    #[error(
        "block difficulty threshold {difficulty_threshold:?} is not equal to \
         the expected difficulty threshold {expected_difficulty:?}"
    )]
    #[non_exhaustive]
    InvalidDifficultyThreshold {
        difficulty_threshold: CompactDifficulty,
        expected_difficulty: CompactDifficulty,
    },

    #[error("block at height {block_height:?} is the highest block a chain can have")]
    #[non_exhaustive]
    HeightOverflow { block_height: block::Height },

    #[error(
        "block height {candidate_height:?} is not one more than its parent height \
         {parent_height:?}"
    )]
    #[non_exhaustive]
    NonSequentialBlock {
        candidate_height: block::Height,
        /// `None` if the chain is empty.
        parent_height: Option<block::Height>,
    },
}
