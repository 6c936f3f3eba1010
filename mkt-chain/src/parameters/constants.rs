//! Definitions of MktCoin network constants.

use crate::block::Height;

/// The height of the last block in the premine period.
///
/// Before the LWMA upgrade, blocks that follow a block at or below this
/// height use the fixed [`PREMINE_DIFFICULTY_SHIFT`] threshold, rather than
/// a retargeted one.
///
/// This value is the same on every network, and is distinct from the network
/// upgrade heights.
pub const PREMINE_END_HEIGHT: Height = Height(210_000);

/// The premine difficulty threshold is `~0 >> PREMINE_DIFFICULTY_SHIFT`.
///
/// This is much easier than the mainnet proof-of-work limit.
pub const PREMINE_DIFFICULTY_SHIFT: u32 = 1;

/// The LWMA averaging window, in blocks.
///
/// Short chains use a smaller window, see `mkt_state`.
pub const LWMA_AVERAGING_WINDOW: u32 = 30;

/// The LWMA target block spacing in seconds, up to and including the last
/// proof-of-work block.
pub const LWMA_TARGET_SPACING: i64 = 150;

/// The LWMA target block spacing in seconds, after the last proof-of-work
/// block.
pub const LWMA_POST_POW_TARGET_SPACING: i64 = 120;

/// Solve times are clamped to this multiple of the LWMA target spacing, in
/// both directions.
pub const LWMA_SOLVETIME_LIMIT_MULTIPLE: i64 = 7;

/// The LWMA normalisation base, `0.9989`.
///
/// It is raised to the power of `500 / N`, using integer division.
pub const LWMA_ADJUST_BASE: f64 = 0.9989;

/// The numerator of the LWMA adjustment exponent.
pub const LWMA_ADJUST_EXPONENT_NUMERATOR: u32 = 500;

/// Chains with a tip at or below this height get the proof-of-work limit
/// from the LWMA formula, because they don't have enough history to average.
pub const LWMA_BOOTSTRAP_HEIGHT: Height = Height(5);

/// The legacy retarget limits the actual timespan to
/// `[target_timespan / 4, target_timespan * 4]`.
pub const LEGACY_TIMESPAN_ADJUSTMENT_FACTOR: i64 = 4;

/// Mainnet timing and difficulty constants.
pub mod mainnet {
    use crate::{block::Height, work::difficulty::CompactDifficulty};

    /// Two weeks, in seconds.
    pub const TARGET_TIMESPAN: i64 = 14 * 24 * 60 * 60;

    /// Ten minutes, in seconds.
    pub const TARGET_SPACING: i64 = 10 * 60;

    /// The proof-of-work limit is `~0 >> POW_LIMIT_SHIFT`.
    ///
    /// The starting difficulty is 1 / 2^12.
    pub const POW_LIMIT_SHIFT: u32 = 20;

    /// The last proof-of-work block (hard fork 2).
    pub const LAST_POW_BLOCK_HEIGHT: Height = Height(475_000);

    /// The LWMA difficulty adjustment activates at this height (hard fork 1).
    pub const LWMA_ACTIVATION_HEIGHT: Height = Height(256_350);

    /// The genesis block difficulty threshold.
    pub const GENESIS_DIFFICULTY_THRESHOLD: CompactDifficulty =
        CompactDifficulty::from_bits(0x1e0f_ffff);
}

/// Testnet timing and difficulty constants.
///
/// Other testnet values are the same as mainnet.
pub mod testnet {
    use crate::block::Height;

    /// One minute, in seconds.
    pub const TARGET_TIMESPAN: i64 = 60;

    /// One minute, in seconds.
    pub const TARGET_SPACING: i64 = 60;

    /// The last proof-of-work block.
    pub const LAST_POW_BLOCK_HEIGHT: Height = Height(200);

    /// The LWMA difficulty adjustment activates at this height.
    pub const LWMA_ACTIVATION_HEIGHT: Height = Height(55);
}

/// Regtest difficulty constants.
///
/// Other regtest values are the same as testnet.
pub mod regtest {
    use crate::work::difficulty::CompactDifficulty;

    /// The proof-of-work limit is `~0 >> POW_LIMIT_SHIFT`.
    pub const POW_LIMIT_SHIFT: u32 = 1;

    /// The genesis block difficulty threshold.
    pub const GENESIS_DIFFICULTY_THRESHOLD: CompactDifficulty =
        CompactDifficulty::from_bits(0x207f_ffff);
}
