//! Consensus check functions

use mkt_chain::{
    block,
    parameters::NetworkParameters,
    work::difficulty::{CompactDifficulty, ExpandedDifficulty},
};

use crate::error::PowError;

/// Returns `Ok(())` if `hash` passes the proof-of-work filter for
/// `difficulty_threshold`.
///
/// The threshold must decode to a positive, in-range value. The hash passes
/// if it is less than or equal to that value, when both are interpreted as
/// little-endian 256-bit integers.
///
/// If `parameters` skips proof-of-work checks, every hash passes, even for
/// thresholds that would otherwise be invalid.
pub fn check_proof_of_work(
    hash: &block::Hash,
    difficulty_threshold: CompactDifficulty,
    parameters: &NetworkParameters,
) -> Result<(), PowError> {
    if parameters.skip_pow_check() {
        return Ok(());
    }

    let Some(target) = difficulty_threshold.to_expanded() else {
        tracing::debug!(
            ?difficulty_threshold,
            network = ?parameters.network(),
            "rejected invalid difficulty threshold",
        );
        return Err(PowError::BadRange(difficulty_threshold));
    };

    // Note: this is a u256 integer comparison, like bitcoin. Greater values
    // represent *less* work.
    if ExpandedDifficulty::from_hash(hash) > target {
        tracing::debug!(
            ?hash,
            ?difficulty_threshold,
            network = ?parameters.network(),
            "rejected hash above difficulty threshold",
        );
        Err(PowError::HashExceedsTarget {
            hash: *hash,
            difficulty_threshold,
        })?;
    }

    Ok(())
}
