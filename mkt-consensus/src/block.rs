//! Consensus checks for block headers.

pub mod check;
