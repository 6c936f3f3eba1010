//! Tests for difficulty adjustment.

use mkt_chain::{
    block::{BlockRef, Height},
    parameters::{Network, NetworkParameters, ParametersBuilder},
    work::difficulty::CompactDifficulty,
};

use crate::InMemoryChain;

mod prop;

/// The block time of the genesis block in test chains.
const GENESIS_TIME: i64 = 1_000_000;

/// Returns a chain with one block per entry in `times`, starting at the
/// genesis block, where every block has `difficulty_threshold`.
fn chain_with_times(times: &[i64], difficulty_threshold: CompactDifficulty) -> InMemoryChain {
    let mut chain = InMemoryChain::new();

    for (height, time) in (0..).zip(times) {
        let block = BlockRef::from_timestamp(Height(height), *time, difficulty_threshold)
            .expect("test times are in range");
        chain.commit(block).expect("test blocks are sequential");
    }

    chain
}

/// Returns the block times for `count` blocks, `spacing` seconds apart.
fn evenly_spaced_times(count: usize, spacing: i64) -> Vec<i64> {
    (0..).take(count).map(|i| GENESIS_TIME + spacing * i).collect()
}

/// Returns parameters that use LWMA for every block.
fn lwma_parameters() -> ParametersBuilder {
    NetworkParameters::build(Network::Unittest).lwma_activation_height(Height::MIN)
}

/// Returns parameters that use the legacy algorithm with an interval of four
/// blocks, and a premine period that ends at height 2.
fn short_legacy_parameters() -> ParametersBuilder {
    NetworkParameters::build(Network::Unittest)
        .target_timespan(4 * 600)
        .target_spacing(600)
        .premine_end_height(Height(2))
}
