use chrono::{DateTime, TimeZone, Utc};

use crate::work::difficulty::CompactDifficulty;

use super::Height;

/// The fields of an accepted block that difficulty adjustment reads.
///
/// Block storage owns these values, and hands out copies. Once a block is
/// accepted, its `BlockRef` never changes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BlockRef {
    /// The height of the block.
    pub height: Height,

    /// The `header.time` field, as supplied by the miner.
    ///
    /// Block times are not guaranteed to increase with height.
    pub time: DateTime<Utc>,

    /// The `header.difficulty_threshold` field.
    pub difficulty_threshold: CompactDifficulty,
}

impl BlockRef {
    /// Creates a new `BlockRef`.
    pub fn new(
        height: Height,
        time: DateTime<Utc>,
        difficulty_threshold: CompactDifficulty,
    ) -> BlockRef {
        BlockRef {
            height,
            time,
            difficulty_threshold,
        }
    }

    /// Creates a new `BlockRef` from a block time in seconds since the Unix
    /// epoch.
    ///
    /// Returns `None` if `timestamp` is out of range for a `DateTime<Utc>`.
    pub fn from_timestamp(
        height: Height,
        timestamp: i64,
        difficulty_threshold: CompactDifficulty,
    ) -> Option<BlockRef> {
        let time = Utc.timestamp_opt(timestamp, 0).single()?;

        Some(BlockRef::new(height, time, difficulty_threshold))
    }

    /// Returns the block time in seconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.time.timestamp()
    }
}
