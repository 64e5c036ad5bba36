// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cube::{var_mask, Cube},
    display::{EquationDisplay, SumOfProductsMatrixDisplay},
    errors::{check_var_bounds, ReduceError},
    tri_logic::TriLogic,
    truth_table::TruthTable,
};
use once_cell::sync::OnceCell;

/// A reduced single-output function: an OR of cubes over `num_vars` variables.
///
/// Owns its cubes. The default-named equation is rendered on first use and cached.
#[derive(Clone, Debug)]
pub struct SumOfProducts {
    num_vars: u32,
    cubes: Vec<Cube>,
    equation: OnceCell<String>,
}

impl SumOfProducts {
    /// Builds a sum of products from cubes, e.g. ones produced elsewhere.
    pub fn new(num_vars: u32, cubes: Vec<Cube>) -> Result<Self, ReduceError> {
        check_var_bounds(num_vars)?;
        if let Some(cube) = cubes.iter().find(|cube| !cube.fits(num_vars)) {
            return Err(ReduceError::InvalidArgument(format!(
                "cube {:?} refers to variables beyond {}",
                cube, num_vars
            )));
        }
        Ok(Self::from_parts(num_vars, cubes))
    }

    pub(crate) fn from_parts(num_vars: u32, cubes: Vec<Cube>) -> Self {
        Self {
            num_vars,
            cubes,
            equation: OnceCell::new(),
        }
    }

    #[inline]
    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// Returns the cubes in discovery order.
    #[inline]
    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    #[inline]
    pub fn into_cubes(self) -> Vec<Cube> {
        self.cubes
    }

    #[inline]
    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }

    /// Returns true if this is the constant-false function.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Returns true if this is a single cube with every variable free.
    #[inline]
    pub fn is_one(&self) -> bool {
        matches!(self.cubes.as_slice(), [cube] if cube.is_universe(self.num_vars))
    }

    /// Evaluates the function at `input`. Bits above `num_vars` are ignored.
    ///
    /// Never returns [`TriLogic::DontCare`].
    #[inline]
    pub fn evaluate(&self, input: usize) -> TriLogic {
        self.evaluate_bool(input).into()
    }

    pub fn evaluate_bool(&self, input: usize) -> bool {
        let input = input & var_mask(self.num_vars);
        self.cubes.iter().any(|cube| cube.contains_minterm(input))
    }

    /// Checks the function against every constrained entry of `table`.
    ///
    /// Returns the first minterm where they disagree.
    pub fn check_against(&self, table: &TruthTable) -> Result<(), usize> {
        match table
            .values()
            .iter()
            .enumerate()
            .find(|(minterm, expected)| !expected.accepts(self.evaluate_bool(*minterm)))
        {
            Some((minterm, _)) => Err(minterm),
            None => Ok(()),
        }
    }

    /// Counts right and wrong answers over `table`. Don't care entries always count as right.
    pub fn score(&self, table: &TruthTable) -> Score {
        let mut score = Score::default();
        for (minterm, expected) in table.values().iter().enumerate() {
            if expected.accepts(self.evaluate_bool(minterm)) {
                score.right += 1;
            } else {
                score.wrong += 1;
            }
        }
        score
    }

    /// Returns the equation with the default variable names `A`, `B`, ...
    pub fn equation(&self) -> &str {
        self.equation
            .get_or_init(|| self.equation_display().to_string())
    }

    /// Renders the equation, with `var_names[i]` naming variable `i` if given.
    ///
    /// Terms are written in [`TermOrder::Algebraic`](crate::TermOrder::Algebraic) order, not in
    /// the order of [`cubes`](Self::cubes). Use [`equation_display`](Self::equation_display) for
    /// discovery order.
    ///
    /// Unlike [`equation`](Self::equation), allocation failure is reported rather than fatal.
    pub fn render_equation<S: AsRef<str>>(
        &self,
        var_names: Option<&[S]>,
    ) -> Result<String, ReduceError> {
        let mut display = self.equation_display();
        if let Some(var_names) = var_names {
            if var_names.len() < self.num_vars as usize {
                return Err(ReduceError::InvalidArgument(format!(
                    "{} variable names given for {} variables",
                    var_names.len(),
                    self.num_vars
                )));
            }
            display = display.with_var_names(var_names);
        }
        display.try_to_string()
    }

    #[inline]
    pub fn equation_display(&self) -> EquationDisplay<'_> {
        EquationDisplay::new(self)
    }

    #[inline]
    pub fn matrix_display(&self) -> SumOfProductsMatrixDisplay<'_> {
        SumOfProductsMatrixDisplay::new(self)
    }
}

impl PartialEq for SumOfProducts {
    fn eq(&self, other: &Self) -> bool {
        self.num_vars == other.num_vars && self.cubes == other.cubes
    }
}

impl Eq for SumOfProducts {}

/// Right and wrong answers of a [`SumOfProducts`] against a truth table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub right: usize,
    pub wrong: usize,
}

impl std::ops::AddAssign for Score {
    fn add_assign(&mut self, rhs: Self) {
        self.right += rhs.right;
        self.wrong += rhs.wrong;
    }
}
