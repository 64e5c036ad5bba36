// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{tri_logic::TriLogic, truth_table::TruthTable};
use proptest::prelude::*;

impl Arbitrary for TriLogic {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        // Mostly constrained entries, so generated tables still have some structure.
        prop_oneof![
            4 => Just(TriLogic::False),
            4 => Just(TriLogic::True),
            1 => Just(TriLogic::DontCare),
        ]
        .boxed()
    }
}

impl Arbitrary for TruthTable {
    /// Inclusive range of variable counts to pick from.
    type Parameters = Option<(u32, u32)>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let (min_vars, max_vars) = params.unwrap_or((1, 8));
        (min_vars..=max_vars)
            .prop_flat_map(|num_vars| {
                prop::collection::vec(any::<TriLogic>(), 1_usize << num_vars).prop_map(
                    move |values| {
                        TruthTable::new(num_vars, values)
                            .expect("generated table has 2^num_vars entries")
                    },
                )
            })
            .boxed()
    }
}
