//! Block difficulty adjustment calculations for contextual validation.
//!
//! MktCoin uses two difficulty adjustment algorithms:
//!   - a legacy fixed-interval retarget, with a fixed easy threshold during
//!     the premine period, and
//!   - a linearly weighted moving average (LWMA) of recent solve times and
//!     thresholds, which adjusts every block, from the LWMA activation height.
//!
//! Every node must calculate exactly the same bits from the same history, so
//! this module uses the same integer widths, rounding, and wrapping behaviour
//! for every intermediate value.

use chrono::{DateTime, Utc};

use mkt_chain::{
    block::{BlockRef, Height},
    chain_history::ChainHistory,
    parameters::{
        constants::{
            LEGACY_TIMESPAN_ADJUSTMENT_FACTOR, LWMA_ADJUST_BASE, LWMA_ADJUST_EXPONENT_NUMERATOR,
            LWMA_AVERAGING_WINDOW, LWMA_BOOTSTRAP_HEIGHT, LWMA_POST_POW_TARGET_SPACING,
            LWMA_SOLVETIME_LIMIT_MULTIPLE, LWMA_TARGET_SPACING,
        },
        NetworkParameters,
    },
    work::difficulty::{CompactDifficulty, ExpandedDifficulty, U256},
};

use crate::ValidateContextError;

#[cfg(test)]
mod tests;

/// Returns the difficulty threshold required for the block after
/// `last_block`.
///
/// `last_block` is `None` when the next block is the genesis block.
/// Otherwise, `history` must contain `last_block` and its ancestors.
///
/// # Correctness
///
/// The result is consensus-critical. It only depends on the arguments, so
/// concurrent callers get identical results from identical histories.
#[tracing::instrument(
    level = "debug",
    skip(parameters, history),
    fields(network = %parameters.network())
)]
pub fn next_required_bits<H>(
    last_block: Option<&BlockRef>,
    parameters: &NetworkParameters,
    history: H,
) -> Result<CompactDifficulty, ValidateContextError>
where
    H: ChainHistory,
{
    let Some(last_block) = last_block else {
        let genesis_bits = parameters.pow_limit().to_compact();
        tracing::trace!(?genesis_bits, "genesis block uses the proof-of-work limit");

        return Ok(genesis_bits);
    };

    AdjustedDifficulty::new(last_block, parameters, history)?.expected_difficulty_threshold()
}

/// Contains the context needed to calculate the adjusted difficulty for a
/// block.
pub struct AdjustedDifficulty<'p, H> {
    /// The block before the candidate block.
    last_block: BlockRef,
    /// The height of the candidate block.
    candidate_height: Height,
    /// The configured network parameters.
    parameters: &'p NetworkParameters,
    /// Ancestor lookups for `last_block`.
    history: H,
}

impl<'p, H> AdjustedDifficulty<'p, H>
where
    H: ChainHistory,
{
    /// Initialise and return a new `AdjustedDifficulty` for the block after
    /// `last_block`.
    ///
    /// Returns `HeightOverflow` if `last_block` is at or above `Height::MAX`.
    pub fn new(
        last_block: &BlockRef,
        parameters: &'p NetworkParameters,
        history: H,
    ) -> Result<AdjustedDifficulty<'p, H>, ValidateContextError> {
        let candidate_height =
            last_block
                .height
                .next()
                .ok_or(ValidateContextError::HeightOverflow {
                    block_height: last_block.height,
                })?;

        Ok(AdjustedDifficulty {
            last_block: *last_block,
            candidate_height,
            parameters,
            history,
        })
    }

    /// Returns the candidate block's height.
    pub fn candidate_height(&self) -> Height {
        self.candidate_height
    }

    /// Returns true if the candidate block uses the LWMA algorithm.
    pub fn uses_lwma(&self) -> bool {
        self.candidate_height >= self.parameters.lwma_activation_height()
    }

    /// Calculate the expected difficulty threshold for the candidate block.
    pub fn expected_difficulty_threshold(&self) -> Result<CompactDifficulty, ValidateContextError> {
        let expected = if self.uses_lwma() {
            self.lwma_difficulty_threshold()?
        } else {
            self.legacy_difficulty_threshold()?
        };

        tracing::debug!(
            candidate_height = ?self.candidate_height,
            lwma = self.uses_lwma(),
            ?expected,
            "calculated expected difficulty threshold",
        );

        Ok(expected)
    }

    /// The legacy fixed-interval difficulty adjustment.
    fn legacy_difficulty_threshold(&self) -> Result<CompactDifficulty, ValidateContextError> {
        let last_block = &self.last_block;

        if last_block.height <= self.parameters.premine_end_height() {
            return Ok(self.parameters.premine_difficulty_limit().to_compact());
        }

        let interval = self.parameters.difficulty_adjustment_interval();

        // Only change once per difficulty adjustment interval
        if i64::from(self.candidate_height.0) % interval != 0 {
            return Ok(last_block.difficulty_threshold);
        }

        let first_block = self.ancestor(last_block, i64::from(last_block.height.0) - (interval - 1))?;

        let target_timespan = self.parameters.target_timespan();
        let actual_timespan = solve_time(last_block.time, first_block.time).clamp(
            target_timespan / LEGACY_TIMESPAN_ADJUSTMENT_FACTOR,
            target_timespan * LEGACY_TIMESPAN_ADJUSTMENT_FACTOR,
        );

        tracing::trace!(
            interval,
            actual_timespan,
            target_timespan,
            "legacy difficulty adjustment boundary",
        );

        // Multiply before dividing, and discard any bits above 2^256.
        let (scaled, _) = last_block
            .difficulty_threshold
            .decode()
            .magnitude
            .overflowing_mul(U256::from(actual_timespan.unsigned_abs()));
        let threshold =
            ExpandedDifficulty::from(scaled / U256::from(target_timespan.unsigned_abs()));

        Ok(threshold.min(self.parameters.pow_limit()).to_compact())
    }

    /// The LWMA difficulty adjustment.
    fn lwma_difficulty_threshold(&self) -> Result<CompactDifficulty, ValidateContextError> {
        let last_block = &self.last_block;

        if self.parameters.pow_no_retargeting() {
            return Ok(last_block.difficulty_threshold);
        }

        let target_spacing = if self.candidate_height > self.parameters.last_pow_block_height() {
            LWMA_POST_POW_TARGET_SPACING
        } else {
            LWMA_TARGET_SPACING
        };

        if last_block.height <= LWMA_BOOTSTRAP_HEIGHT {
            return Ok(self.parameters.pow_limit().to_compact());
        }

        // Short chains average over all their blocks after genesis.
        let window = LWMA_AVERAGING_WINDOW.min(last_block.height.0 - 1);

        let divisor = lwma_target_divisor(window, target_spacing);
        let solve_time_limit = LWMA_SOLVETIME_LIMIT_MULTIPLE * target_spacing;

        let mut weighted_solve_time: i64 = 0;
        let mut scaled_target_sum = U256::zero();

        let first_height = self.candidate_height.0 - window;
        for (weight, height) in (1..).zip(first_height..self.candidate_height.0) {
            let block = self.ancestor(last_block, i64::from(height))?;
            let previous_block = self.ancestor(&block, i64::from(height) - 1)?;

            let solve_time = solve_time(block.time, previous_block.time)
                .clamp(-solve_time_limit, solve_time_limit);
            weighted_solve_time += solve_time * weight;

            let target = block.difficulty_threshold.decode().magnitude;
            scaled_target_sum = scaled_target_sum.overflowing_add(target / divisor).0;
        }

        // Adversarial timestamps can make the weighted sum negative.
        let weighted_solve_time = weighted_solve_time.max(1);

        tracing::trace!(
            window,
            target_spacing,
            weighted_solve_time,
            ?divisor,
            "LWMA difficulty adjustment",
        );

        let (next_target, _) =
            scaled_target_sum.overflowing_mul(U256::from(weighted_solve_time.unsigned_abs()));

        Ok(ExpandedDifficulty::from(next_target)
            .min(self.parameters.pow_limit())
            .to_compact())
    }

    /// Returns the ancestor of `block` at `height`.
    ///
    /// Negative heights are before the genesis block, so they are always
    /// missing.
    fn ancestor(&self, block: &BlockRef, height: i64) -> Result<BlockRef, ValidateContextError> {
        u32::try_from(height)
            .ok()
            .and_then(|ancestor_height| self.history.ancestor(block, Height(ancestor_height)))
            .ok_or(ValidateContextError::MissingAncestor {
                block_height: block.height,
                ancestor_height: height,
            })
    }
}

/// Returns the number of seconds between `previous_time` and `time`.
///
/// Miners choose block times, so the result can be negative.
fn solve_time(time: DateTime<Utc>, previous_time: DateTime<Utc>) -> i64 {
    (time - previous_time).num_seconds()
}

/// Returns `k * N * N`, the LWMA divisor for each block's target, for a
/// `window` of `N` blocks.
///
/// `k = (N + 1) / 2 * 0.9989^(500 / N) * T`, where both divisions are integer
/// divisions and `T` is the `target_spacing`. The floating-point product is
/// truncated to an integer, after multiplying by `N` twice.
pub fn lwma_target_divisor(window: u32, target_spacing: i64) -> U256 {
    let adjust = LWMA_ADJUST_BASE.powf(f64::from(LWMA_ADJUST_EXPONENT_NUMERATOR / window));
    let k = f64::from((window + 1) / 2) * adjust * target_spacing as f64;

    let window = f64::from(window);
    let divisor = k * window * window;

    // Truncates towards zero, like the float to integer conversion in other
    // implementations.
    U256::from(divisor as u64)
}
