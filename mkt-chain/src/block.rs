//! Block identifiers, and the per-block values used by difficulty adjustment.

mod block_ref;
mod hash;
mod height;


pub use block_ref::BlockRef;
pub use hash::Hash;
pub use height::{Height, ParseHeightError};
