// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use arrayvec::ArrayVec;
use std::{borrow::Cow, fmt, iter::FusedIterator};

/// The largest number of variables a cube can describe.
pub const MAX_VARS: u32 = usize::BITS;

/// A product term over at most [`MAX_VARS`] variables, stored as a pair of machine words.
///
/// A bit set in `dont_care` means the corresponding variable is free for this cube. Bits in
/// `value` at don't care positions are always zero, so two cubes describing the same set of
/// minterms compare equal.
///
/// Bit `num_vars - 1` is variable 0, bit 0 is the last variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cube {
    value: usize,
    dont_care: usize,
}

impl Cube {
    #[inline]
    pub fn new(value: usize, dont_care: usize) -> Self {
        Self {
            value: value & !dont_care,
            dont_care,
        }
    }

    /// Returns the cube containing exactly one minterm.
    #[inline]
    pub fn minterm(minterm: usize) -> Self {
        Self::new(minterm, 0)
    }

    /// Returns the cube containing every minterm over `num_vars` variables.
    #[inline]
    pub fn universe(num_vars: u32) -> Self {
        Self::new(0, var_mask(num_vars))
    }

    #[inline]
    pub fn value(&self) -> usize {
        self.value
    }

    #[inline]
    pub fn dont_care(&self) -> usize {
        self.dont_care
    }

    /// Returns a copy of this cube with the bits in `mask` made free.
    #[inline]
    pub fn with_dont_care(&self, mask: usize) -> Self {
        Self::new(self.value, self.dont_care | mask)
    }

    #[inline]
    pub fn contains_minterm(&self, minterm: usize) -> bool {
        (minterm | self.dont_care) == (self.value | self.dont_care)
    }

    /// Returns true if every minterm of `other` is also a minterm of `self`.
    pub fn contains(&self, other: &Cube) -> bool {
        other.dont_care & !self.dont_care == 0 && self.contains_minterm(other.value)
    }

    /// Returns true if no variable below `num_vars` is fixed.
    #[inline]
    pub fn is_universe(&self, num_vars: u32) -> bool {
        let mask = var_mask(num_vars);
        self.dont_care & mask == mask
    }

    /// Returns true if the cube only refers to the low `num_vars` bits.
    #[inline]
    pub fn fits(&self, num_vars: u32) -> bool {
        (self.value | self.dont_care) & !var_mask(num_vars) == 0
    }

    /// Returns the literal for variable `var_ix`: `Some(true)` for a true literal,
    /// `Some(false)` for a complemented one, `None` if the variable is free.
    ///
    /// Variable 0 is the most significant of the `num_vars` bits.
    pub fn literal(&self, num_vars: u32, var_ix: u32) -> Option<bool> {
        assert!(
            var_ix < num_vars,
            "variable {} must be in range [0..{})",
            var_ix,
            num_vars
        );
        let bit = 1_usize << (num_vars - 1 - var_ix);
        if self.dont_care & bit != 0 {
            None
        } else {
            Some(self.value & bit != 0)
        }
    }

    /// Returns the number of fixed variables among the low `num_vars` bits.
    #[inline]
    pub fn literal_count(&self, num_vars: u32) -> u32 {
        num_vars - (self.dont_care & var_mask(num_vars)).count_ones()
    }

    /// Returns the number of minterms covered, or `None` if it overflows a `usize`.
    #[inline]
    pub fn minterm_count(&self) -> Option<usize> {
        1_usize.checked_shl(self.dont_care.count_ones())
    }

    /// Returns an iterator over every minterm consistent with this cube.
    #[inline]
    pub fn minterms(&self) -> Minterms {
        Minterms::new(self)
    }

    #[inline]
    pub fn matrix_display(&self, num_vars: u32) -> CubeMatrixDisplay<'_> {
        CubeMatrixDisplay::new(self, num_vars)
    }
}

/// Returns the mask of the low `num_vars` bits.
#[inline]
pub(crate) fn var_mask(num_vars: u32) -> usize {
    match 1_usize.checked_shl(num_vars) {
        Some(size) => size - 1,
        None => usize::MAX,
    }
}

/// Walks all concrete assignments of a cube's don't care bits.
///
/// The walk starts at the all-zero representative and counts in binary over the don't care
/// positions, lowest position first. After the last assignment the counter has wrapped back to
/// the start, which ends the iteration. Call [`Minterms::restart`] to walk again.
#[derive(Clone, Debug)]
pub struct Minterms {
    free_bits: ArrayVec<usize, { MAX_VARS as usize }>,
    base: usize,
    current: usize,
    done: bool,
}

impl Minterms {
    fn new(cube: &Cube) -> Self {
        let free_bits = (0..MAX_VARS)
            .map(|bit_ix| 1_usize << bit_ix)
            .filter(|bit| cube.dont_care & bit != 0)
            .collect();
        Self {
            free_bits,
            base: cube.value,
            current: cube.value,
            done: false,
        }
    }

    /// Rewinds the walk to the first minterm.
    pub fn restart(&mut self) {
        self.current = self.base;
        self.done = false;
    }
}

impl Iterator for Minterms {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        let minterm = self.current;

        // Carry through set bits until a clear one is found. Running off the end means the
        // counter wrapped around.
        self.done = true;
        for &bit in &self.free_bits {
            if self.current & bit != 0 {
                self.current &= !bit;
            } else {
                self.current |= bit;
                self.done = false;
                break;
            }
        }

        Some(minterm)
    }
}

impl FusedIterator for Minterms {}

pub struct CubeMatrixDisplay<'a> {
    cube: &'a Cube,
    num_vars: u32,
    format: MatrixDisplayFormat,
    internal_separator: Cow<'a, str>,
}

impl<'a> CubeMatrixDisplay<'a> {
    pub fn new(cube: &'a Cube, num_vars: u32) -> Self {
        Self {
            cube,
            num_vars,
            format: MatrixDisplayFormat::default(),
            internal_separator: Cow::Borrowed(" "),
        }
    }

    pub fn with_format(mut self, format: MatrixDisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_internal_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.internal_separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for CubeMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for var_ix in 0..self.num_vars {
            let literal = self.cube.literal(self.num_vars, var_ix);
            write!(f, "{}", self.format.char_for_literal(literal))?;
            if var_ix < self.num_vars - 1 {
                write!(f, "{}", self.internal_separator)?;
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub enum MatrixDisplayFormat {
    /// Display a cube using the format `100-1`, with dashes representing free variables.
    #[default]
    Dashes,

    /// Display a cube using the format `10021`, with `2` representing free variables.
    Numeric,
}

impl MatrixDisplayFormat {
    /// Returns the character that would be displayed for a literal.
    pub fn char_for_literal(self, literal: Option<bool>) -> char {
        match literal {
            Some(true) => '1',
            Some(false) => '0',
            None => match self {
                Self::Dashes => '-',
                Self::Numeric => '2',
            },
        }
    }
}
