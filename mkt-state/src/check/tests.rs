//! Tests for contextual checks.

use color_eyre::eyre::Report;

use mkt_chain::{
    block::{BlockRef, Height},
    parameters::Network,
    work::difficulty::CompactDifficulty,
};

use crate::InMemoryChain;

use super::*;

#[test]
fn test_sequential_height_check() {
    mkt_test::init();

    let height = Height(347_499);

    height_one_more_than_parent_height(Some(Height(0)), height)
        .expect_err("block is much lower, should fail");
    height_one_more_than_parent_height(Some(Height(347_497)), height)
        .expect_err("parent height is 2 less, should fail");
    height_one_more_than_parent_height(Some(Height(347_498)), height)
        .expect("parent height is 1 less, should be good");
    height_one_more_than_parent_height(Some(Height(347_499)), height)
        .expect_err("parent height is equal, should fail");
    height_one_more_than_parent_height(Some(Height(500_000)), height)
        .expect_err("parent height is way more, should fail");
    height_one_more_than_parent_height(None, height)
        .expect_err("only the genesis block has no parent");

    height_one_more_than_parent_height(None, Height::MIN)
        .expect("the genesis block has no parent");
    height_one_more_than_parent_height(Some(Height::MAX), Height::MIN)
        .expect_err("heights don't wrap around");

    assert_eq!(
        height_one_more_than_parent_height(Some(Height(5)), Height(7)),
        Err(ValidateContextError::NonSequentialBlock {
            candidate_height: Height(7),
            parent_height: Some(Height(5)),
        })
    );
}

#[test]
fn test_difficulty_threshold_check() -> Result<(), Report> {
    mkt_test::init();

    let parameters = Network::Mainnet.parameters();
    let empty = InMemoryChain::new();

    // Genesis
    difficulty_threshold_is_valid(
        parameters.genesis_difficulty_threshold(),
        None,
        &parameters,
        &empty,
    )?;

    let wrong = CompactDifficulty::from_bits(0x1d00_ffff);
    assert_eq!(
        difficulty_threshold_is_valid(wrong, None, &parameters, &empty),
        Err(ValidateContextError::InvalidDifficultyThreshold {
            difficulty_threshold: wrong,
            expected_difficulty: parameters.genesis_difficulty_threshold(),
        })
    );

    // Premine
    let last_block = BlockRef::from_timestamp(Height(1_000), 1_000_000, wrong)
        .expect("test times are in range");
    let premine_bits = parameters.premine_difficulty_limit().to_compact();
    difficulty_threshold_is_valid(premine_bits, Some(&last_block), &parameters, &empty)?;
    assert!(
        difficulty_threshold_is_valid(wrong, Some(&last_block), &parameters, &empty).is_err()
    );

    // The compact encoding must match exactly, not just the expanded value.
    let one = CompactDifficulty::from_bits(0x0300_0001);
    let one_alias = CompactDifficulty::from_bits(0x0101_0000);
    assert_eq!(one.to_expanded(), one_alias.to_expanded());

    let last_block = BlockRef::from_timestamp(Height(210_001), 1_000_000, one)
        .expect("test times are in range");
    difficulty_threshold_is_valid(one, Some(&last_block), &parameters, &empty)?;
    assert_eq!(
        difficulty_threshold_is_valid(one_alias, Some(&last_block), &parameters, &empty),
        Err(ValidateContextError::InvalidDifficultyThreshold {
            difficulty_threshold: one_alias,
            expected_difficulty: one,
        })
    );

    // Missing history is reported, rather than treated as an invalid
    // threshold.
    let last_block = BlockRef::from_timestamp(Height(300_000), 1_000_000, wrong)
        .expect("test times are in range");
    assert!(matches!(
        difficulty_threshold_is_valid(wrong, Some(&last_block), &parameters, &empty),
        Err(ValidateContextError::MissingAncestor { .. })
    ));

    Ok(())
}
