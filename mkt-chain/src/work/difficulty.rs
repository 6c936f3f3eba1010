//! Block difficulty data structures and calculations
//!
//! The block difficulty "target threshold" is stored in the block header as a
//! 32-bit `CompactDifficulty`. The `block::Hash` must be less than or equal
//! to the `ExpandedDifficulty` threshold, when represented as a 256-bit integer
//! in little-endian order.
//!
//! The target threshold is also used to calculate the `Work` for each block.
//! The block work is used to find the chain with the greatest total work. Each
//! block's work value depends on the fixed threshold in the block header, not
//! the actual work represented by the block header hash.

use std::{
    cmp::{Ordering, PartialEq, PartialOrd},
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use crate::block;

pub use crate::work::u256::U256;

#[cfg(test)]
mod tests;

/// A 32-bit "compact bits" value, which represents the difficulty threshold for
/// a block header.
///
/// Used for:
///   - checking the `difficulty_threshold` value in the block header,
///   - calculating the 256-bit `ExpandedDifficulty` threshold, for comparison
///     with the block header hash, and
///   - calculating the block work.
///
/// Details:
///
/// This is a floating-point encoding, with a 24-bit signed mantissa,
/// an 8-bit exponent, an offset of 3, and a radix of 256.
/// (IEEE 754 32-bit floating-point values use a separate sign bit, an implicit
/// leading mantissa bit, an offset of 127, and a radix of 2.)
///
/// The precise bit pattern of a `CompactDifficulty` value is
/// consensus-critical, because difficulty adjustment re-encodes every
/// calculated target, and the next block must claim exactly those bits.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CompactDifficulty(pub(crate) u32);

impl fmt::Debug for CompactDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // There isn't a standard way to show different representations of the
        // same value
        f.debug_tuple("CompactDifficulty")
            // Use hex, because it's a float
            .field(&format_args!("{:#010x}", self.0))
            // Use expanded difficulty, for bitwise difficulty comparisons
            .field(&format_args!("{:?}", self.to_expanded()))
            .finish()
    }
}

impl fmt::Display for CompactDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl From<u32> for CompactDifficulty {
    fn from(bits: u32) -> Self {
        CompactDifficulty(bits)
    }
}

impl From<CompactDifficulty> for u32 {
    fn from(compact: CompactDifficulty) -> Self {
        compact.0
    }
}

/// An invalid CompactDifficulty value, for testing.
pub const INVALID_COMPACT_DIFFICULTY: CompactDifficulty = CompactDifficulty(u32::MAX);

/// The raw result of decoding a [`CompactDifficulty`].
///
/// The sign and overflow conditions are reported separately from the
/// magnitude. Consensus checks must reject thresholds where either flag is
/// set, or where the magnitude is zero. Difficulty adjustment uses the
/// magnitude of the previous block's bits as-is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodedCompact {
    /// The unsigned 256-bit value, modulo 2^256.
    pub magnitude: U256,

    /// The mantissa is non-zero and its sign bit is set.
    pub negative: bool,

    /// The value does not fit in 256 bits.
    pub overflow: bool,
}

impl DecodedCompact {
    /// Returns the magnitude, if the value is positive and in range.
    pub fn into_expanded(self) -> Option<ExpandedDifficulty> {
        if self.negative || self.overflow || self.magnitude.is_zero() {
            None
        } else {
            Some(ExpandedDifficulty(self.magnitude))
        }
    }
}

/// A 256-bit unsigned "expanded difficulty" value.
///
/// Used as a target threshold for the difficulty of a `block::Hash`.
///
/// Details:
///
/// The precise bit pattern of an `ExpandedDifficulty` value is
/// consensus-critical, because it is compared with the `block::Hash`.
///
/// Note that each `CompactDifficulty` value can be converted from a
/// range of `ExpandedDifficulty` values, because the precision of
/// the floating-point format requires rounding on conversion.
///
/// Therefore, consensus-critical code must perform the specified
/// conversions to `CompactDifficulty`, even if the original
/// `ExpandedDifficulty` values are known.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ExpandedDifficulty(U256);

impl fmt::Debug for ExpandedDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = [0; 32];
        self.0.to_big_endian(&mut buf);
        f.debug_tuple("ExpandedDifficulty")
            .field(&hex::encode(buf))
            .finish()
    }
}

/// A 256-bit unsigned "Work" value for a single block.
///
/// Details:
///
/// The relative value of `Work` is consensus-critical, because it is used to
/// choose the best chain. Each block contributes `2^256 / (target + 1)`,
/// so harder (smaller) targets contribute more work.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Work(U256);

impl Default for Work {
    fn default() -> Self {
        Work(U256::zero())
    }
}

impl Work {
    /// Return the inner `U256` value.
    pub fn as_u256(self) -> U256 {
        self.0
    }

    /// Returns true if this block contributes no work.
    ///
    /// Only malformed difficulty thresholds have zero work.
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Debug for Work {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Work")
            // Use hex, because expanded difficulty is in hex.
            .field(&format_args!("{:#x}", self.0))
            .field(&format_args!("{}", self.0))
            .finish()
    }
}

impl CompactDifficulty {
    /// CompactDifficulty exponent offset.
    const OFFSET: u32 = 3;

    /// CompactDifficulty floating-point precision.
    const PRECISION: u32 = 24;

    /// CompactDifficulty sign bit, part of the signed mantissa.
    const SIGN_BIT: u32 = 1 << (CompactDifficulty::PRECISION - 1);

    /// CompactDifficulty unsigned mantissa mask.
    ///
    /// Also the maximum unsigned mantissa value.
    const UNSIGNED_MANTISSA_MASK: u32 = CompactDifficulty::SIGN_BIT - 1;

    /// Creates a `CompactDifficulty` from its raw header bits.
    pub const fn from_bits(bits: u32) -> CompactDifficulty {
        CompactDifficulty(bits)
    }

    /// Returns the raw header bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Decode the compact representation into a 256-bit magnitude, and its
    /// sign and overflow flags.
    ///
    /// The overflow conditions are checked on the exponent and mantissa, so
    /// the magnitude calculation never needs an out-of-range shift. If every
    /// mantissa bit is shifted out of the 256-bit range, the magnitude is
    /// zero. Otherwise, bits above 2^256 are discarded.
    pub fn decode(self) -> DecodedCompact {
        // Alias the struct constants here, so the code is easier to read.
        const OFFSET: u32 = CompactDifficulty::OFFSET;
        const PRECISION: u32 = CompactDifficulty::PRECISION;
        const SIGN_BIT: u32 = CompactDifficulty::SIGN_BIT;
        const UNSIGNED_MANTISSA_MASK: u32 = CompactDifficulty::UNSIGNED_MANTISSA_MASK;

        // The exponent is the number of bytes in the magnitude, 0..=255.
        let size = self.0 >> PRECISION;

        // Underflow: the low mantissa bytes are discarded before the sign and
        // overflow checks, so they only apply to the remaining bytes.
        let mantissa = if size <= OFFSET {
            (self.0 & UNSIGNED_MANTISSA_MASK) >> (8 * (OFFSET - size))
        } else {
            self.0 & UNSIGNED_MANTISSA_MASK
        };

        let negative = mantissa != 0 && (self.0 & SIGN_BIT) == SIGN_BIT;

        // The magnitude needs more than 32 bytes.
        let overflow = mantissa != 0
            && (size > 34
                || (mantissa > u8::MAX.into() && size > 33)
                || (mantissa > u16::MAX.into() && size > 32));

        let shift = 8 * size.saturating_sub(OFFSET);
        let magnitude = if shift >= 256 {
            U256::zero()
        } else {
            U256::from(mantissa) << shift
        };

        DecodedCompact {
            magnitude,
            negative,
            overflow,
        }
    }

    /// Calculate the ExpandedDifficulty for a compact representation.
    ///
    /// Returns None for negative, zero, and overflow values. Nodes reject
    /// these values before comparing the hash.
    pub fn to_expanded(self) -> Option<ExpandedDifficulty> {
        self.decode().into_expanded()
    }

    /// Calculate the Work for a compact representation.
    ///
    /// Returns None if the corresponding ExpandedDifficulty is None.
    pub fn to_work(self) -> Option<Work> {
        self.to_expanded().map(Work::from)
    }
}

/// Returns the work contributed by a block with `difficulty_threshold`.
///
/// Negative, overflowing and zero thresholds contribute no work.
pub fn block_work(difficulty_threshold: CompactDifficulty) -> Work {
    difficulty_threshold.to_work().unwrap_or_default()
}

impl From<ExpandedDifficulty> for Work {
    fn from(expanded: ExpandedDifficulty) -> Self {
        // We need to compute `2^256 / (expanded + 1)`, but we can't represent
        // 2^256, as it's too large for a u256. However, as 2^256 is at least as
        // large as `expanded + 1`, it is equal to
        // `((2^256 - expanded - 1) / (expanded + 1)) + 1`, or
        let (divisor, wrapped) = expanded.0.overflowing_add(U256::one());
        if wrapped {
            // `expanded` is 2^256 - 1, so the quotient is exactly 1.
            return Work(U256::one());
        }

        Work((!expanded.0 / divisor) + 1)
    }
}

impl From<ExpandedDifficulty> for CompactDifficulty {
    fn from(value: ExpandedDifficulty) -> Self {
        value.to_compact()
    }
}

impl ExpandedDifficulty {
    /// Returns the difficulty of the hash.
    ///
    /// Used to implement comparisons between difficulties and hashes.
    ///
    /// Hashes are not used to calculate the difficulties of future blocks, so
    /// users of this module should avoid converting hashes into difficulties.
    pub fn from_hash(hash: &block::Hash) -> ExpandedDifficulty {
        U256::from_little_endian(&hash.0).into()
    }

    /// Returns the largest threshold representable by this type, `~0 >> shift`.
    ///
    /// Used to write network proof-of-work limits the way they are usually
    /// quoted.
    pub fn max_shifted_right(shift: u32) -> ExpandedDifficulty {
        ExpandedDifficulty(U256::MAX >> shift)
    }

    /// Returns true if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Calculate the CompactDifficulty for an expanded difficulty.
    ///
    /// The mantissa keeps the three most significant bytes, and the rest are
    /// truncated. If the top mantissa bit would be set, the mantissa is
    /// shifted down a byte, so the encoding is never negative.
    ///
    /// Zero is encoded as `0x00000000`, which is rejected by the consensus
    /// rules when it is expanded.
    pub fn to_compact(self) -> CompactDifficulty {
        // Alias the constants here, so the code is easier to read.
        const OFFSET: usize = CompactDifficulty::OFFSET as usize;
        const PRECISION: u32 = CompactDifficulty::PRECISION;
        const SIGN_BIT: u32 = CompactDifficulty::SIGN_BIT;

        // The number of significant bytes in the value.
        let mut size = (self.0.bits() + 7) / 8;

        let mut mantissa = if size <= OFFSET {
            // Value is small, shift up if needed
            //
            // The cast is lossless, because the value has at most 3 bytes.
            (self.0.low_u64() << (8 * (OFFSET - size))) as u32
        } else {
            // Value is large, shift down
            (self.0 >> (8 * (size - OFFSET))).low_u32()
        };

        // Make sure the mantissa is non-negative, by shifting down values that
        // would otherwise overflow into the sign bit
        if mantissa & SIGN_BIT == SIGN_BIT {
            mantissa >>= 8;
            size += 1;
        }

        let size = u32::try_from(size).expect("a 256-bit value has at most 33 compact bytes");

        CompactDifficulty(mantissa | (size << PRECISION))
    }
}

impl From<U256> for ExpandedDifficulty {
    fn from(value: U256) -> Self {
        ExpandedDifficulty(value)
    }
}

impl From<ExpandedDifficulty> for U256 {
    fn from(value: ExpandedDifficulty) -> Self {
        value.0
    }
}

impl PartialEq<block::Hash> for ExpandedDifficulty {
    /// Is `self` equal to `other`?
    ///
    /// See `partial_cmp` for details.
    fn eq(&self, other: &block::Hash) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<block::Hash> for ExpandedDifficulty {
    /// `block::Hash`es are compared with `ExpandedDifficulty` thresholds by
    /// converting the hash to a 256-bit integer in little-endian order.
    ///
    /// Greater values represent *less* work.
    fn partial_cmp(&self, other: &block::Hash) -> Option<Ordering> {
        self.partial_cmp(&ExpandedDifficulty::from_hash(other))
    }
}

impl PartialEq<ExpandedDifficulty> for block::Hash {
    /// Is `self` equal to `other`?
    ///
    /// See `<ExpandedDifficulty as PartialOrd<block::Hash>::partial_cmp`
    /// for details.
    fn eq(&self, other: &ExpandedDifficulty) -> bool {
        other.eq(self)
    }
}

impl PartialOrd<ExpandedDifficulty> for block::Hash {
    /// How does `self` compare to `other`?
    ///
    /// See `<ExpandedDifficulty as PartialOrd<block::Hash>::partial_cmp`
    /// for details.
    fn partial_cmp(&self, other: &ExpandedDifficulty) -> Option<Ordering> {
        // Use the canonical implementation, but reverse the order
        other.partial_cmp(self).map(Ordering::reverse)
    }
}

/// The total work of a chain of blocks.
///
/// Chain work only ever increases as blocks are appended. Arithmetic wraps
/// modulo 2^256, which no real chain can reach.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ChainWork(U256);

impl Default for ChainWork {
    fn default() -> Self {
        ChainWork(U256::zero())
    }
}

impl ChainWork {
    /// Return the inner `U256` value.
    pub fn as_u256(self) -> U256 {
        self.0
    }
}

impl fmt::Debug for ChainWork {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("ChainWork")
            .field(&format_args!("{:#x}", self.0))
            .finish()
    }
}

impl From<Work> for ChainWork {
    fn from(work: Work) -> Self {
        ChainWork(work.0)
    }
}

impl Add for Work {
    type Output = ChainWork;

    fn add(self, rhs: Work) -> ChainWork {
        ChainWork::from(self) + rhs
    }
}

impl Add<Work> for ChainWork {
    type Output = ChainWork;

    fn add(self, rhs: Work) -> Self::Output {
        ChainWork(self.0.overflowing_add(rhs.0).0)
    }
}

impl AddAssign<Work> for ChainWork {
    fn add_assign(&mut self, rhs: Work) {
        *self = *self + rhs;
    }
}

impl Sub<Work> for ChainWork {
    type Output = ChainWork;

    fn sub(self, rhs: Work) -> Self::Output {
        ChainWork(self.0.overflowing_sub(rhs.0).0)
    }
}

impl SubAssign<Work> for ChainWork {
    fn sub_assign(&mut self, rhs: Work) {
        *self = *self - rhs;
    }
}

impl Sum<Work> for ChainWork {
    fn sum<I: Iterator<Item = Work>>(iter: I) -> Self {
        iter.fold(ChainWork::default(), Add::add)
    }
}
