//! Randomised difficulty adjustment tests.

use mkt_test::prelude::*;

use mkt_chain::work::difficulty::{CompactDifficulty, ExpandedDifficulty, U256};

use super::{chain_with_times, lwma_parameters, short_legacy_parameters, GENESIS_TIME};

/// Returns block times starting at the genesis time, with `solve_times`
/// between each block.
fn times_from_solve_times(solve_times: &[i64]) -> Vec<i64> {
    let mut times = vec![GENESIS_TIME];
    for solve_time in solve_times {
        let previous_time = *times.last().expect("times is never empty");
        times.push(previous_time + solve_time);
    }

    times
}

proptest! {
    /// The legacy adjustment never exceeds the proof-of-work limit, and never
    /// changes the threshold by more than a factor of 4.
    #[test]
    fn legacy_adjustment_is_clamped(
        target_bytes in any::<[u8; 32]>(),
        target_shift in 20u32..240,
        solve_times in prop::collection::vec(-1_000_000i64..1_000_000, 7),
    ) {
        mkt_test::init();

        let parameters = short_legacy_parameters().finish().expect("valid parameters");
        let pow_limit = parameters.pow_limit();

        let target = U256::from_little_endian(&target_bytes) >> target_shift;
        let difficulty_threshold = ExpandedDifficulty::from(target).to_compact();
        let Some(target) = difficulty_threshold.to_expanded() else {
            // Skip zero targets
            return Ok(());
        };
        let target = U256::from(target);

        let chain = chain_with_times(&times_from_solve_times(&solve_times), difficulty_threshold);
        let next = chain
            .next_required_bits(&parameters)
            .expect("the chain has every ancestor");
        let zero = ExpandedDifficulty::from(U256::zero());
        let next = next.to_expanded().unwrap_or(zero);

        let timespan = U256::from(parameters.target_timespan().unsigned_abs());
        let easiest = ExpandedDifficulty::from(target * timespan * 4 / timespan).min(pow_limit);
        let hardest = ExpandedDifficulty::from(target * (timespan / 4) / timespan).min(pow_limit);
        let hardest = hardest.to_compact().to_expanded().unwrap_or(zero);

        prop_assert!(next <= pow_limit);
        prop_assert!(next <= easiest);
        prop_assert!(next >= hardest);
    }

    /// The LWMA adjustment never exceeds the proof-of-work limit, and always
    /// produces a non-negative compact value.
    #[test]
    fn lwma_adjustment_is_limited(
        difficulty_threshold in any::<CompactDifficulty>(),
        solve_times in prop::collection::vec(-10_000i64..10_000, 6..45),
    ) {
        mkt_test::init();

        let parameters = lwma_parameters().finish().expect("valid parameters");

        let chain = chain_with_times(&times_from_solve_times(&solve_times), difficulty_threshold);
        let next = chain
            .next_required_bits(&parameters)
            .expect("the chain has every ancestor");

        let decoded = next.decode();
        prop_assert!(!decoded.negative);
        prop_assert!(!decoded.overflow);
        prop_assert!(ExpandedDifficulty::from(decoded.magnitude) <= parameters.pow_limit());
    }
}
