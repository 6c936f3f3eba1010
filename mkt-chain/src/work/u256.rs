//! The 256-bit unsigned integer behind targets, hashes and work values.
// `construct_uint!` expands to code that trips a lot of clippy lints,
// so it lives in its own module.
#![allow(clippy::all)]
#![allow(clippy::range_plus_one)]
#![allow(clippy::fallible_impl_from)]
#![allow(missing_docs)]

use uint::construct_uint;

construct_uint! {
    pub struct U256(4);
}
