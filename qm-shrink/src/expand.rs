// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expansion of true minterms into maximal implicants.

use crate::{
    cube::Cube, errors::ReduceError, tri_logic::TriLogic, truth_table::TruthTable,
};
use bitvec::prelude::*;
use log::{debug, trace};

/// Expands every unresolved true minterm of `table` into a maximal cube.
///
/// Minterms are visited in ascending order. Each new cube starts at the minterm itself and tries
/// to free one variable at a time, lowest bit first; a variable is freed only if the half of the
/// hypercube it adds contains no false entry. Every minterm covered by a finished cube is marked
/// resolved and never starts a cube of its own.
///
/// The cubes come back in discovery order, which is what [`filter_primes`](crate::filter_primes)
/// expects.
pub fn expand(table: &TruthTable) -> Result<Vec<Cube>, ReduceError> {
    expand_values(table.values(), table.num_vars())
}

/// Same as [`expand`], on a table that has already been validated.
pub(crate) fn expand_values(values: &[TriLogic], num_vars: u32) -> Result<Vec<Cube>, ReduceError> {
    let mut resolved = resolved_flags(values.len())?;

    // Every cube is anchored at a distinct true minterm.
    let true_count = values.iter().filter(|value| value.is_true()).count();
    let mut cubes = Vec::new();
    cubes.try_reserve_exact(true_count)?;

    for (minterm, value) in values.iter().enumerate() {
        if !value.is_true() || resolved[minterm] {
            continue;
        }

        let cube = expand_minterm(values, num_vars, minterm);
        for covered in cube.minterms() {
            resolved.set(covered, true);
        }
        trace!(
            "expand: minterm {} -> {}",
            minterm,
            cube.matrix_display(num_vars)
        );
        cubes.push(cube);
    }

    cubes.shrink_to_fit();
    debug!(
        "expand: {} variables, {} true minterms, {} cubes",
        num_vars,
        true_count,
        cubes.len()
    );
    Ok(cubes)
}

fn expand_minterm(values: &[TriLogic], num_vars: u32, minterm: usize) -> Cube {
    let mut cube = Cube::minterm(minterm);
    for bit_ix in 0..num_vars {
        let bit = 1_usize << bit_ix;
        // The cube itself is already known to be free of false entries, so only the mirror
        // image across `bit` needs checking.
        let trial = Cube::new(cube.value() ^ bit, cube.dont_care());
        if trial.minterms().all(|m| !values[m].is_false()) {
            cube = cube.with_dont_care(bit);
        }
    }
    cube
}

fn resolved_flags(len: usize) -> Result<BitVec<usize, Lsb0>, ReduceError> {
    let word_count = (len + usize::BITS as usize - 1) / usize::BITS as usize;
    let mut words: Vec<usize> = Vec::new();
    words.try_reserve_exact(word_count)?;
    words.resize(word_count, 0);

    let mut flags = BitVec::from_vec(words);
    flags.truncate(len);
    Ok(flags)
}
