// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reduces a single-output truth table to a compact sum-of-products equation.
//!
//! The reduction runs in two phases, in the spirit of Quine-McCluskey:
//!
//! 1. [`expand`] grows every unresolved true minterm into a maximal cube that touches no false
//!    entry.
//! 2. [`filter_primes`] makes one greedy pass over those cubes and drops the ones every minterm
//!    of which is covered by some other cube.
//!
//! The result is correct (every true minterm is covered, no false minterm is) but not
//! guaranteed to be minimal.
//!
//! ```
//! use qm_shrink::{reduce, TriLogic};
//!
//! // Row index = Var1 * 4 + Var2 * 2 + Var3.
//! let table = [0, 0, 0, 1, 1, 1, 0, 1].map(|v| TriLogic::from_numeric(v).unwrap());
//! let sop = reduce(&table, 3).unwrap();
//!
//! assert_eq!(sop.equation(), "AB' + BC");
//! assert_eq!(sop.evaluate(0b101), TriLogic::True);
//! ```

pub mod cube;
pub mod display;
pub mod errors;
pub mod expand;
pub mod primes;
#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;
pub mod sum_of_products;
pub mod tri_logic;
pub mod truth_table;

pub use cube::{Cube, Minterms, MAX_VARS};
pub use display::{EquationDisplay, TermOrder};
pub use errors::ReduceError;
pub use expand::expand;
pub use primes::{filter_primes, FilterStats};
pub use sum_of_products::{Score, SumOfProducts};
pub use tri_logic::TriLogic;
pub use truth_table::TruthTable;

/// Reduces `truth_table`, which must hold `2^num_vars` entries, to a sum of products.
#[inline]
pub fn reduce(truth_table: &[TriLogic], num_vars: u32) -> Result<SumOfProducts, ReduceError> {
    reduce_with_stats(truth_table, num_vars, &mut FilterStats::default())
}

/// Like [`reduce`], adding the prime filter's decisions to `stats`.
pub fn reduce_with_stats(
    truth_table: &[TriLogic],
    num_vars: u32,
    stats: &mut FilterStats,
) -> Result<SumOfProducts, ReduceError> {
    truth_table::check_table(truth_table.len(), num_vars)?;
    let cubes = expand::expand_values(truth_table, num_vars)?;
    let cubes = filter_primes(cubes, num_vars, stats)?;
    Ok(SumOfProducts::from_parts(num_vars, cubes))
}

/// Renders `sop` as an equation. Without `var_names`, variables are named `A`, `B`, ...
///
/// Terms are sorted as described by [`TermOrder::Algebraic`].
#[inline]
pub fn render_equation<S: AsRef<str>>(
    sop: &SumOfProducts,
    var_names: Option<&[S]>,
) -> Result<String, ReduceError> {
    sop.render_equation(var_names)
}

/// Evaluates `sop` at `input`. The result is never [`TriLogic::DontCare`].
#[inline]
pub fn evaluate(sop: &SumOfProducts, input: usize) -> TriLogic {
    sop.evaluate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_log::test;

    fn reduce_numeric<const N: usize>(num_vars: u32, numeric: [u8; N]) -> SumOfProducts {
        TruthTable::from_numeric(num_vars, numeric)
            .unwrap()
            .reduce()
            .unwrap()
    }

    #[test]
    fn test_one_variable() {
        let zero = reduce_numeric(1, [0, 0]);
        assert_eq!(zero.cube_count(), 0);
        assert_eq!(zero.equation(), "0");
        assert_eq!(evaluate(&zero, 0), TriLogic::False);
        assert_eq!(evaluate(&zero, 1), TriLogic::False);

        assert_eq!(reduce_numeric(1, [1, 1]).equation(), "1");
        assert_eq!(reduce_numeric(1, [1, 0]).equation(), "A'");
        assert_eq!(reduce_numeric(1, [0, 1]).equation(), "A");
        assert_eq!(reduce_numeric(1, [2, 1]).equation(), "1");
        assert_eq!(reduce_numeric(1, [2, 0]).equation(), "0");
    }

    #[test]
    fn test_worked_example() {
        let sop = reduce_numeric(3, [0, 0, 0, 1, 1, 1, 0, 1]);
        assert_eq!(
            sop.cubes(),
            &[Cube::new(0b011, 0b100), Cube::new(0b100, 0b001)]
        );
        assert_eq!(render_equation::<&str>(&sop, None).unwrap(), "AB' + BC");
        assert_eq!(
            render_equation(&sop, Some(&["Var1", "Var2", "Var3"][..])).unwrap(),
            "Var1Var2' + Var2Var3"
        );
    }

    #[test]
    fn test_redundant_cube_removed() {
        let mut stats = FilterStats::new();
        let table = TruthTable::from_numeric(3, [1, 1, 0, 1, 0, 0, 0, 1]).unwrap();
        let sop = table.reduce_with_stats(&mut stats).unwrap();
        assert_eq!(sop.equation(), "A'B' + BC");
        assert_eq!((stats.kept(), stats.removed()), (2, 1));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(
            reduce(&[TriLogic::True], 0),
            Err(ReduceError::TooFewVariables { num_vars: 0 })
        );
        assert_eq!(
            reduce(&[TriLogic::True, TriLogic::False], usize::BITS + 1),
            Err(ReduceError::TooManyVariables {
                num_vars: usize::BITS + 1,
                max: usize::BITS,
            })
        );
        assert!(matches!(
            reduce(&[], 1),
            Err(ReduceError::InvalidArgument(_))
        ));
        assert!(matches!(
            reduce(&[TriLogic::True; 3], 2),
            Err(ReduceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_stats_untouched_on_error() {
        let mut stats = FilterStats::new();
        assert!(reduce_with_stats(&[TriLogic::True; 3], 2, &mut stats).is_err());
        assert_eq!(stats, FilterStats::default());
    }

    /// Checks the coverage property against the table directly, without going through evaluate.
    fn assert_coverage(table: &TruthTable, sop: &SumOfProducts) {
        for (minterm, value) in table.values().iter().enumerate() {
            let covered = sop.cubes().iter().any(|cube| cube.contains_minterm(minterm));
            match value {
                TriLogic::True => assert!(covered, "true minterm {} is covered", minterm),
                TriLogic::False => assert!(!covered, "false minterm {} is not covered", minterm),
                TriLogic::DontCare => {}
            }
        }
    }

    #[test]
    fn test_exhaustive_boolean() {
        for num_vars in 1..=3 {
            let len = 1_usize << num_vars;
            for bits in 0..(1_u32 << len) {
                let table =
                    TruthTable::from_fn(num_vars, |m| ((bits >> m) & 1 == 1).into()).unwrap();
                let sop = table.reduce().unwrap();
                assert_eq!(sop.check_against(&table), Ok(()), "table {}", table);
                assert_coverage(&table, &sop);
            }
        }
    }

    #[test]
    fn test_exhaustive_tri_state() {
        for num_vars in 1..=2 {
            let len = 1_usize << num_vars;
            for code in 0..3_u32.pow(len as u32) {
                let table = TruthTable::from_fn(num_vars, |m| {
                    let digit = (code / 3_u32.pow(m as u32)) % 3;
                    TriLogic::from_numeric(digit as u8).unwrap()
                })
                .unwrap();
                let sop = table.reduce().unwrap();
                assert_eq!(sop.check_against(&table), Ok(()), "table {}", table);
                assert_coverage(&table, &sop);
            }
        }
    }

    #[test]
    fn test_one_false_and_one_true() {
        for num_vars in 1..=6 {
            for special in 0..(1_usize << num_vars) {
                let one_false = TruthTable::from_fn(num_vars, |m| (m != special).into()).unwrap();
                let sop = one_false.reduce().unwrap();
                assert_eq!(sop.check_against(&one_false), Ok(()));
                // One cube per complemented literal of the false minterm.
                assert_eq!(sop.cube_count(), num_vars as usize);

                let one_true = TruthTable::from_fn(num_vars, |m| (m == special).into()).unwrap();
                let sop = one_true.reduce().unwrap();
                assert_eq!(sop.cubes(), &[Cube::minterm(special)]);
            }
        }
    }

    /// Straightforward table scans of both phases, for comparison with the real ones.
    fn reference_reduce(table: &TruthTable) -> (Vec<Cube>, Vec<bool>) {
        let values = table.values();
        let in_cube = |j: usize, value: usize, dont_care: usize| {
            (j & !dont_care) == (value & !dont_care)
        };

        let mut resolved = vec![false; values.len()];
        let mut expanded = Vec::new();
        for m in 0..values.len() {
            if !values[m].is_true() || resolved[m] {
                continue;
            }
            let mut dont_care = 0;
            for bit_ix in 0..table.num_vars() {
                let bit = 1 << bit_ix;
                let blocked = (0..values.len())
                    .any(|j| in_cube(j, m ^ bit, dont_care) && values[j].is_false());
                if !blocked {
                    dont_care |= bit;
                }
            }
            for (j, flag) in resolved.iter_mut().enumerate() {
                if in_cube(j, m, dont_care) {
                    *flag = true;
                }
            }
            expanded.push(Cube::new(m, dont_care));
        }

        let mut counts: Vec<usize> = (0..values.len())
            .map(|j| expanded.iter().filter(|c| in_cube(j, c.value(), c.dont_care())).count())
            .collect();
        let mut kept = Vec::new();
        for cube in &expanded {
            let members: Vec<usize> = (0..values.len())
                .filter(|&j| in_cube(j, cube.value(), cube.dont_care()))
                .collect();
            let keep = members.iter().any(|&j| counts[j] == 1);
            if !keep {
                for &j in &members {
                    counts[j] -= 1;
                }
            }
            kept.push(keep);
        }
        (expanded, kept)
    }

    proptest! {
        #[test]
        fn proptest_matches_reference_walk(table in any_with::<TruthTable>(Some((1, 6)))) {
            let (expanded, kept) = reference_reduce(&table);
            prop_assert_eq!(expand(&table).unwrap(), expanded.clone());

            let mut stats = FilterStats::new();
            let sop = table.reduce_with_stats(&mut stats).unwrap();
            let expected: Vec<Cube> = expanded
                .iter()
                .zip(&kept)
                .filter(|(_, keep)| **keep)
                .map(|(cube, _)| *cube)
                .collect();
            prop_assert_eq!(sop.cubes(), expected.as_slice());
            prop_assert_eq!(stats.kept(), kept.iter().filter(|&&keep| keep).count());
            prop_assert_eq!(stats.removed(), kept.iter().filter(|&&keep| !keep).count());
        }

        #[test]
        fn proptest_sound_and_covering(table: TruthTable) {
            let sop = table.reduce().unwrap();
            for (minterm, &value) in table.values().iter().enumerate() {
                if !value.is_dont_care() {
                    prop_assert_eq!(sop.evaluate(minterm), value, "minterm {}", minterm);
                }
            }
            assert_coverage(&table, &sop);
        }

        #[test]
        fn proptest_deterministic(table: TruthTable) {
            let first = table.reduce().unwrap();
            let second = reduce(table.values(), table.num_vars()).unwrap();
            prop_assert_eq!(first.cubes(), second.cubes());
            prop_assert_eq!(first.equation(), second.equation());
        }

        #[test]
        fn proptest_render_idempotent(table: TruthTable) {
            let sop = table.reduce().unwrap();
            let first = sop.render_equation::<&str>(None).unwrap();
            let second = sop.render_equation::<&str>(None).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.as_str(), sop.equation());
        }

        #[test]
        fn proptest_stats_account_for_every_cube(table: TruthTable) {
            let mut stats = FilterStats::new();
            let expanded = expand(&table).unwrap();
            let sop = table.reduce_with_stats(&mut stats).unwrap();
            prop_assert_eq!(stats.kept(), sop.cube_count());
            prop_assert_eq!(stats.kept() + stats.removed(), expanded.len());
        }
    }
}
