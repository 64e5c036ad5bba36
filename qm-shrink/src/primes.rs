// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cube::Cube,
    errors::{check_num_vars, ReduceError},
};
use log::{debug, trace};
use std::ops::AddAssign;

/// Counts of the decisions made by [`filter_primes`].
///
/// Stats are only diagnostic: nothing in the reduction reads them back. Pass the same value to
/// several reductions to accumulate totals, and [`reset`](Self::reset) it between measurements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterStats {
    kept: usize,
    removed: usize,
}

impl FilterStats {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cubes kept because they were the only cover of some minterm.
    #[inline]
    pub fn kept(&self) -> usize {
        self.kept
    }

    /// Number of cubes dropped as redundant.
    #[inline]
    pub fn removed(&self) -> usize {
        self.removed
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl AddAssign for FilterStats {
    fn add_assign(&mut self, rhs: Self) {
        self.kept += rhs.kept;
        self.removed += rhs.removed;
    }
}

/// Drops cubes whose every minterm is also covered by another cube.
///
/// This is a single greedy pass in the order the cubes are given. Each minterm carries a count of
/// the cubes covering it. A cube that is the only cover of one of its minterms is kept; any other
/// cube is dropped on the spot and its counts released, so cubes examined later see the cover
/// without it. The result depends on the input order and is not guaranteed to be a minimum cover,
/// but it covers exactly the minterms the input covered.
///
/// Kept cubes stay in their original relative order.
pub fn filter_primes(
    mut cubes: Vec<Cube>,
    num_vars: u32,
    stats: &mut FilterStats,
) -> Result<Vec<Cube>, ReduceError> {
    let len = check_num_vars(num_vars)?;
    if let Some(cube) = cubes.iter().find(|cube| !cube.fits(num_vars)) {
        return Err(ReduceError::InvalidArgument(format!(
            "cube {:?} refers to variables beyond {}",
            cube, num_vars
        )));
    }

    let mut ref_counts: Vec<u32> = Vec::new();
    ref_counts.try_reserve_exact(len)?;
    ref_counts.resize(len, 0);

    for cube in &cubes {
        for minterm in cube.minterms() {
            ref_counts[minterm] += 1;
        }
    }

    let mut run = FilterStats::default();
    cubes.retain(|cube| {
        let is_prime = cube.minterms().any(|minterm| ref_counts[minterm] == 1);
        if is_prime {
            run.kept += 1;
        } else {
            for minterm in cube.minterms() {
                ref_counts[minterm] -= 1;
            }
            run.removed += 1;
        }
        trace!(
            "filter_primes: {} {}",
            if is_prime { "keep" } else { "drop" },
            cube.matrix_display(num_vars)
        );
        is_prime
    });

    debug!(
        "filter_primes: kept {}, removed {}",
        run.kept(),
        run.removed()
    );
    *stats += run;
    Ok(cubes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_drops_redundant_middle_cube() {
        let cubes = vec![
            Cube::new(0b000, 0b001),
            Cube::new(0b001, 0b010),
            Cube::new(0b011, 0b100),
        ];
        let mut stats = FilterStats::new();
        let filtered = filter_primes(cubes, 3, &mut stats).unwrap();
        assert_eq!(
            filtered,
            vec![Cube::new(0b000, 0b001), Cube::new(0b011, 0b100)]
        );
        assert_eq!(stats.kept(), 2);
        assert_eq!(stats.removed(), 1);
    }

    #[test]
    fn test_order_dependence() {
        // Two identical cubes: the first one is dropped, because at that point the second one
        // still covers everything. The second is then the sole cover and is kept.
        let cube = Cube::new(0b10, 0b01);
        let mut stats = FilterStats::new();
        let filtered = filter_primes(vec![cube, cube], 2, &mut stats).unwrap();
        assert_eq!(filtered, vec![cube]);
        assert_eq!((stats.kept(), stats.removed()), (1, 1));

        // Smaller cubes listed before a cube containing them are all dropped.
        let cubes = vec![
            Cube::new(0b01, 0b00),
            Cube::new(0b00, 0b01),
            Cube::new(0b00, 0b11),
        ];
        let filtered = filter_primes(cubes, 2, &mut stats).unwrap();
        assert_eq!(filtered, vec![Cube::new(0b00, 0b11)]);
        assert_eq!((stats.kept(), stats.removed()), (2, 3), "stats accumulate");

        stats.reset();
        assert_eq!(stats, FilterStats::default());
    }

    #[test]
    fn test_empty_and_errors() {
        let mut stats = FilterStats::new();
        assert_eq!(filter_primes(vec![], 4, &mut stats), Ok(vec![]));
        assert_eq!(stats, FilterStats::default());

        assert_eq!(
            filter_primes(vec![], 0, &mut stats),
            Err(ReduceError::TooFewVariables { num_vars: 0 })
        );
        assert!(matches!(
            filter_primes(vec![Cube::minterm(0b100)], 2, &mut stats),
            Err(ReduceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_preserves_coverage() {
        let cubes = vec![
            Cube::new(0b0000, 0b0011),
            Cube::new(0b0010, 0b0001),
            Cube::new(0b0010, 0b0101),
            Cube::new(0b0100, 0b1000),
            Cube::new(0b0000, 0b1010),
            Cube::new(0b1111, 0b0000),
        ];
        let covered = |cubes: &[Cube]| -> Vec<bool> {
            (0..16)
                .map(|m| cubes.iter().any(|cube| cube.contains_minterm(m)))
                .collect()
        };
        let before = covered(&cubes);
        let filtered = filter_primes(cubes.clone(), 4, &mut FilterStats::new()).unwrap();
        assert_eq!(covered(&filtered), before);
        assert!(filtered.len() < cubes.len());
    }
}
