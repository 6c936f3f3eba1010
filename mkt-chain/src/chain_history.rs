//! Read-only access to the history of an accepted chain.

use std::sync::Arc;

use crate::block::{BlockRef, Height};

/// Ancestor lookups over a consistent snapshot of block history.
///
/// Difficulty adjustment only depends on this capability, so it works with
/// any storage layout that can find a block's ancestor by height, such as a
/// height-indexed vector, a skip list, or a database snapshot.
///
/// Implementations must return the same answers for the whole of a single
/// difficulty calculation. Accepted blocks must never change.
pub trait ChainHistory {
    /// Returns the ancestor of `block` at `height`.
    ///
    /// Returns `block` itself if `height` is `block.height`. Returns `None`
    /// if `height` is above `block.height`, or the ancestor is not available.
    fn ancestor(&self, block: &BlockRef, height: Height) -> Option<BlockRef>;
}

impl<T> ChainHistory for &T
where
    T: ChainHistory + ?Sized,
{
    fn ancestor(&self, block: &BlockRef, height: Height) -> Option<BlockRef> {
        (**self).ancestor(block, height)
    }
}

impl<T> ChainHistory for Arc<T>
where
    T: ChainHistory + ?Sized,
{
    fn ancestor(&self, block: &BlockRef, height: Height) -> Option<BlockRef> {
        self.as_ref().ancestor(block, height)
    }
}
