use super::difficulty::*;

use crate::block;

use proptest::{arbitrary::Arbitrary, prelude::*};

impl Arbitrary for CompactDifficulty {
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        any::<[u8; 32]>()
            .prop_filter_map("zero CompactDifficulty values are invalid", |bytes| {
                // Difficulty adjustment only ever produces re-encoded targets,
                // so we make a random ExpandedDifficulty, then convert it.
                let compact = ExpandedDifficulty::from_hash(&block::Hash(bytes)).to_compact();
                compact.to_expanded().map(|_| compact)
            })
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

impl Arbitrary for ExpandedDifficulty {
    type Parameters = ();

    fn arbitrary_with(_args: ()) -> Self::Strategy {
        any::<CompactDifficulty>()
            .prop_map(|compact| {
                compact
                    .to_expanded()
                    .expect("arbitrary compact values are valid")
            })
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

impl Arbitrary for Work {
    type Parameters = ();

    fn arbitrary_with(_args: ()) -> Self::Strategy {
        any::<ExpandedDifficulty>().prop_map(Work::from).boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}
