// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cube::{Cube, MatrixDisplayFormat},
    errors::ReduceError,
    sum_of_products::SumOfProducts,
};
use itertools::{Itertools, Position};
use std::{
    borrow::Cow,
    cmp::Ordering,
    collections::TryReserveError,
    fmt::{self, Write},
};

/// The order in which terms are written out by [`EquationDisplay`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TermOrder {
    /// Sort terms by their literals, variable 0 first, in the order: true literal, complemented
    /// literal, variable absent. `AB' + BC` rather than `BC + AB'`.
    #[default]
    Algebraic,

    /// Write terms in the order the cubes were discovered.
    Discovery,
}

/// Writes a [`SumOfProducts`] as an equation such as `AB' + BC`.
///
/// The constant functions are written `0` and `1`.
#[derive(Clone, Debug)]
pub struct EquationDisplay<'a> {
    sop: &'a SumOfProducts,
    var_names: Option<Vec<&'a str>>,
    term_separator: Cow<'a, str>,
    complement: Cow<'a, str>,
    order: TermOrder,
}

impl<'a> EquationDisplay<'a> {
    pub fn new(sop: &'a SumOfProducts) -> Self {
        Self {
            sop,
            var_names: None,
            term_separator: Cow::Borrowed(" + "),
            complement: Cow::Borrowed("'"),
            order: TermOrder::default(),
        }
    }

    /// Names variable `i` with `var_names[i]`. Variables past the end of the list keep their
    /// default names.
    pub fn with_var_names<S: AsRef<str>>(mut self, var_names: &'a [S]) -> Self {
        self.var_names = Some(var_names.iter().map(|name| name.as_ref()).collect());
        self
    }

    pub fn with_term_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.term_separator = separator.into();
        self
    }

    /// Sets the marker written after a complemented variable.
    pub fn with_complement(mut self, complement: impl Into<Cow<'a, str>>) -> Self {
        self.complement = complement.into();
        self
    }

    pub fn with_term_order(mut self, order: TermOrder) -> Self {
        self.order = order;
        self
    }

    /// Renders into a `String`, reporting allocation failure as [`ReduceError::OutOfMemory`].
    pub fn try_to_string(&self) -> Result<String, ReduceError> {
        let mut out = String::new();
        out.try_reserve_exact(self.rendered_len())?;
        write!(out, "{}", self).map_err(|_| ReduceError::OutOfMemory)?;
        Ok(out)
    }

    /// Returns the length in bytes of the rendered equation.
    pub fn rendered_len(&self) -> usize {
        if self.constant().is_some() {
            return 1;
        }
        let num_vars = self.sop.num_vars();
        let literals: usize = self
            .sop
            .cubes()
            .iter()
            .map(|cube| {
                (0..num_vars)
                    .map(|var_ix| match cube.literal(num_vars, var_ix) {
                        Some(true) => self.name_len(var_ix),
                        Some(false) => self.name_len(var_ix) + self.complement.len(),
                        None => 0,
                    })
                    .sum::<usize>()
            })
            .sum();
        let separators = self.sop.cube_count().saturating_sub(1) * self.term_separator.len();
        literals + separators
    }

    fn constant(&self) -> Option<char> {
        if self.sop.is_zero() {
            Some('0')
        } else if self.sop.is_one() {
            Some('1')
        } else {
            None
        }
    }

    fn name_len(&self, var_ix: u32) -> usize {
        match self.named(var_ix) {
            Some(name) => name.len(),
            None => VarSymbol::new(var_ix as usize).len(),
        }
    }

    fn named(&self, var_ix: u32) -> Option<&'a str> {
        self.var_names
            .as_ref()
            .and_then(|names| names.get(var_ix as usize).copied())
    }

    fn write_term(&self, f: &mut fmt::Formatter, cube: &Cube) -> fmt::Result {
        let num_vars = self.sop.num_vars();
        for var_ix in 0..num_vars {
            let literal = match cube.literal(num_vars, var_ix) {
                Some(literal) => literal,
                None => continue,
            };
            match self.named(var_ix) {
                Some(name) => f.write_str(name)?,
                None => write!(f, "{}", VarSymbol::new(var_ix as usize))?,
            }
            if !literal {
                f.write_str(&self.complement)?;
            }
        }
        Ok(())
    }

    fn ordered_terms(&self) -> Result<Vec<&'a Cube>, TryReserveError> {
        let mut terms: Vec<&'a Cube> = Vec::new();
        terms.try_reserve_exact(self.sop.cube_count())?;
        terms.extend(self.sop.cubes());
        if self.order == TermOrder::Algebraic {
            let num_vars = self.sop.num_vars();
            // Ties are identical cubes, which render identically.
            terms.sort_unstable_by(|a, b| {
                for var_ix in 0..num_vars {
                    match (a.literal(num_vars, var_ix), b.literal(num_vars, var_ix)) {
                        (Some(true), Some(true)) | (Some(false), Some(false)) | (None, None) => {
                            continue
                        }
                        (Some(true), Some(false) | None) => return Ordering::Less,
                        (Some(false) | None, Some(true)) => return Ordering::Greater,
                        (Some(false), None) => return Ordering::Less,
                        (None, Some(false)) => return Ordering::Greater,
                    }
                }
                Ordering::Equal
            });
        }
        Ok(terms)
    }
}

impl<'a> fmt::Display for EquationDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(constant) = self.constant() {
            return write!(f, "{}", constant);
        }
        // Only an allocation failure can fail here.
        let terms = self.ordered_terms().map_err(|_| fmt::Error)?;
        for term in terms.into_iter().with_position() {
            match term {
                Position::First(cube) | Position::Middle(cube) => {
                    self.write_term(f, cube)?;
                    f.write_str(&self.term_separator)?;
                }
                Position::Last(cube) | Position::Only(cube) => {
                    self.write_term(f, cube)?;
                }
            }
        }
        Ok(())
    }
}

/// Writes one cube per line in matrix form, variable 0 first.
#[derive(Clone, Debug)]
pub struct SumOfProductsMatrixDisplay<'a> {
    sop: &'a SumOfProducts,
    format: MatrixDisplayFormat,
    internal_separator: Cow<'a, str>,
    cube_separator: (Cow<'a, str>, bool),
}

impl<'a> SumOfProductsMatrixDisplay<'a> {
    pub fn new(sop: &'a SumOfProducts) -> Self {
        Self {
            sop,
            format: MatrixDisplayFormat::default(),
            internal_separator: Cow::Borrowed(" "),
            cube_separator: (Cow::Borrowed("\n"), true),
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

    pub fn with_cube_separator(
        mut self,
        separator: impl Into<Cow<'a, str>>,
        print_last: bool,
    ) -> Self {
        self.cube_separator = (separator.into(), print_last);
        self
    }
}

impl<'a> fmt::Display for SumOfProductsMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cube_count = self.sop.cube_count();
        for (cube_ix, cube) in self.sop.cubes().iter().enumerate() {
            let cube_display = cube
                .matrix_display(self.sop.num_vars())
                .with_format(self.format)
                .with_internal_separator(&*self.internal_separator);
            write!(f, "{}", cube_display)?;

            let (cube_separator, print_last) = &self.cube_separator;
            if *print_last || cube_ix < cube_count - 1 {
                write!(f, "{}", cube_separator)?;
            }
        }

        Ok(())
    }
}

const VAR_SYMBOLS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Default variable name: `A` through `Z`, then `AA`, `AB`, ...
///
/// Written straight to the formatter, one letter at a time.
#[derive(Copy, Clone, Debug)]
pub(crate) struct VarSymbol(usize);

impl VarSymbol {
    #[inline]
    pub(crate) fn new(var_ix: usize) -> Self {
        Self(var_ix)
    }

    /// The symbol for the leading letters, if there are more than one.
    fn prefix(self) -> Option<Self> {
        match self.0 / VAR_SYMBOLS.len() {
            0 => None,
            rest => Some(Self(rest - 1)),
        }
    }

    fn last_char(self) -> char {
        VAR_SYMBOLS[self.0 % VAR_SYMBOLS.len()]
    }

    fn len(self) -> usize {
        1 + self.prefix().map_or(0, Self::len)
    }
}

impl fmt::Display for VarSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(prefix) = self.prefix() {
            write!(f, "{}", prefix)?;
        }
        f.write_char(self.last_char())
    }
}
