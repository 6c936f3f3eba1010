//! Consensus critical contextual checks

use mkt_chain::{
    block::{BlockRef, Height},
    chain_history::ChainHistory,
    parameters::NetworkParameters,
    work::difficulty::CompactDifficulty,
};

use crate::ValidateContextError;

pub mod difficulty;

#[cfg(test)]
mod tests;

/// Validate the `difficulty_threshold` from a candidate block's header.
///
/// The candidate block is the block after `last_block`, or the genesis block
/// if `last_block` is `None`. Its difficulty threshold must be exactly equal
/// to the threshold calculated from `history`.
#[tracing::instrument(
    name = "contextual_difficulty_validation",
    skip(parameters, history),
    fields(network = %parameters.network())
)]
pub fn difficulty_threshold_is_valid<H>(
    difficulty_threshold: CompactDifficulty,
    last_block: Option<&BlockRef>,
    parameters: &NetworkParameters,
    history: H,
) -> Result<(), ValidateContextError>
where
    H: ChainHistory,
{
    let expected_difficulty = difficulty::next_required_bits(last_block, parameters, history)?;

    if difficulty_threshold != expected_difficulty {
        Err(ValidateContextError::InvalidDifficultyThreshold {
            difficulty_threshold,
            expected_difficulty,
        })?
    }

    Ok(())
}

/// Returns `ValidateContextError::NonSequentialBlock` if the block height isn't
/// equal to the parent_height+1.
///
/// A `parent_height` of `None` means the candidate must be the genesis block.
pub(crate) fn height_one_more_than_parent_height(
    parent_height: Option<Height>,
    candidate_height: Height,
) -> Result<(), ValidateContextError> {
    let expected_height = match parent_height {
        Some(parent_height) => parent_height.next(),
        None => Some(Height::MIN),
    };

    if expected_height != Some(candidate_height) {
        Err(ValidateContextError::NonSequentialBlock {
            candidate_height,
            parent_height,
        })
    } else {
        Ok(())
    }
}
