//! Proof-of-work difficulty and chain work.

pub mod difficulty;
mod u256;

#[cfg(any(test, feature = "proptest-impl"))]
mod arbitrary;
