use std::{
    fmt,
    ops::{Add, Sub},
    str::FromStr,
};

use thiserror::Error;

/// The height of a block is the length of the chain back to the genesis block.
///
/// # Invariants
///
/// Users should not construct block heights greater than `Height::MAX`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Height(pub u32);

/// An error parsing a block height.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseHeightError {
    /// The string is not a `u32`.
    #[error("block height is not an integer: {0}")]
    NotAnInteger(#[from] std::num::ParseIntError),

    /// The height is above `Height::MAX`.
    #[error("block height {0} exceeds the maximum height")]
    TooHigh(u32),
}

impl FromStr for Height {
    type Err = ParseHeightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let height: u32 = s.parse()?;
        if height > Height::MAX_AS_U32 {
            return Err(ParseHeightError::TooHigh(height));
        }

        Ok(Height(height))
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Height {
    /// The minimum Height.
    ///
    /// Due to the underlying type, it is impossible to construct block heights
    /// less than `Height::MIN`.
    ///
    /// Style note: Sometimes, `Height::MIN` is less readable than
    /// `Height(0)`. Use whichever makes sense in context.
    pub const MIN: Height = Height(0);

    /// The maximum Height.
    ///
    /// MktCoin nodes store block heights as signed 32-bit integers, so this is
    /// the highest block any node can accept.
    ///
    /// Users should not construct block heights greater than `Height::MAX`.
    pub const MAX: Height = Height(i32::MAX as u32);

    /// The maximum Height as a u32, for range patterns.
    ///
    /// `Height::MAX.0` can't be used in match range patterns, use this
    /// alias instead.
    pub const MAX_AS_U32: u32 = Self::MAX.0;

    /// Returns the next height, or `None` if it would exceed `Height::MAX`.
    pub fn next(self) -> Option<Height> {
        self + 1
    }

    /// Returns the previous height, or `None` for the genesis height.
    pub fn previous(self) -> Option<Height> {
        self - 1
    }

    /// Returns true if this is the genesis height.
    pub fn is_min(self) -> bool {
        self == Height::MIN
    }
}

impl Add<u32> for Height {
    type Output = Option<Height>;

    fn add(self, rhs: u32) -> Option<Height> {
        let result = self.0.checked_add(rhs)?;
        (result <= Height::MAX_AS_U32).then_some(Height(result))
    }
}

impl Sub<u32> for Height {
    type Output = Option<Height>;

    fn sub(self, rhs: u32) -> Option<Height> {
        self.0.checked_sub(rhs).map(Height)
    }
}

#[cfg(any(test, feature = "proptest-impl"))]
mod arbitrary {
    use proptest::prelude::*;

    use super::Height;

    impl Arbitrary for Height {
        type Parameters = ();

        fn arbitrary_with(_args: ()) -> Self::Strategy {
            (Height::MIN.0..=Height::MAX.0).prop_map(Height).boxed()
        }

        type Strategy = BoxedStrategy<Self>;
    }
}
