use mkt_test::prelude::*;

use super::super::*;

proptest! {
    /// Check Expanded, Compact, and Work conversions.
    ///
    /// Make sure the conversions don't panic, and that they round-trip and compare
    /// correctly.
    #[test]
    fn prop_difficulty_conversion(expanded_seed in any::<block::Hash>()) {
        let expanded_seed = ExpandedDifficulty::from_hash(&expanded_seed);

        let hash_zero = block::Hash([0; 32]);
        let hash_max = block::Hash([0xff; 32]);
        prop_assert!(expanded_seed >= hash_zero);
        prop_assert!(expanded_seed <= hash_max);

        // Skip invalid seeds
        prop_assume!(expanded_seed != hash_zero);

        let compact = expanded_seed.to_compact();
        let expanded_trunc = compact.to_expanded();
        let work = compact.to_work();

        if let Some(expanded_trunc) = expanded_trunc {
            // zero compact values are invalid, and return None on conversion
            prop_assert!(expanded_trunc > hash_zero);
            // the maximum compact value has less precision than a hash
            prop_assert!(expanded_trunc < hash_max);

            // the truncated value should be less than or equal to the seed
            prop_assert!(expanded_trunc <= expanded_seed);

            // roundtrip
            let compact_trip = expanded_trunc.to_compact();
            prop_assert_eq!(compact, compact_trip);

            let expanded_trip = compact_trip.to_expanded().expect("roundtrip expanded is valid");
            prop_assert_eq!(expanded_trunc, expanded_trip);

            let work = work.expect("valid compact values have work");
            prop_assert!(!work.is_zero());
            prop_assert_eq!(Some(work), compact_trip.to_work());
        } else {
            prop_assert_eq!(work, None);
        }
    }

    /// Check that decoding arbitrary header bits never panics, and that the
    /// flags agree with the expanded value.
    #[test]
    fn prop_decode_any_bits(bits in any::<u32>()) {
        let compact = CompactDifficulty::from_bits(bits);
        let decoded = compact.decode();

        prop_assert_eq!(decoded.into_expanded(), compact.to_expanded());

        if decoded.negative || decoded.overflow || decoded.magnitude.is_zero() {
            prop_assert_eq!(compact.to_expanded(), None);
            prop_assert!(block_work(compact).is_zero());
        } else {
            prop_assert!(!block_work(compact).is_zero());

            // valid values re-encode to the same target, but not always the
            // same bits
            let expanded = compact.to_expanded().expect("valid compact values expand");
            let canonical = expanded.to_compact();
            prop_assert_eq!(canonical.to_expanded(), Some(expanded));
        }
    }

    /// Check that harder targets always have more work.
    #[test]
    fn prop_work_order(a in any::<ExpandedDifficulty>(), b in any::<ExpandedDifficulty>()) {
        let work_a = Work::from(a);
        let work_b = Work::from(b);

        prop_assert!(!work_a.is_zero());
        prop_assert!(!work_b.is_zero());

        if a < b {
            prop_assert!(work_a >= work_b);
        } else if a > b {
            prop_assert!(work_a <= work_b);
        } else {
            prop_assert_eq!(work_a, work_b);
        }
    }

    /// Check that chain work accumulates in order, and can be undone.
    #[test]
    fn prop_chain_work_sum(works in prop::collection::vec(any::<Work>(), 0..32)) {
        let total: ChainWork = works.iter().copied().sum();

        let mut running = ChainWork::default();
        for work in &works {
            let previous = running;
            running += *work;
            prop_assert!(running > previous);
        }
        prop_assert_eq!(running, total);

        for work in works.iter().rev() {
            running -= *work;
        }
        prop_assert_eq!(running, ChainWork::default());
    }
}
