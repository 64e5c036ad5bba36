// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors returned while reducing, rendering or constructing truth tables.
///
/// Every error is reported synchronously; no partially built cube list or equation is ever
/// handed back alongside one.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReduceError {
    /// The truth table has fewer than one variable.
    #[error("at least 1 variable is required, found {num_vars}")]
    TooFewVariables { num_vars: u32 },

    /// More variables than fit in a single machine word.
    #[error("at most {max} variables are supported, found {num_vars}")]
    TooManyVariables { num_vars: u32, max: u32 },

    /// The input was malformed: wrong table length, bad numeric value, short name list...
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A table sized allocation failed.
    #[error("out of memory")]
    OutOfMemory,
}

impl From<TryReserveError> for ReduceError {
    fn from(_: TryReserveError) -> Self {
        ReduceError::OutOfMemory
    }
}

/// Checks the variable count against the bounds of a one-word cube.
pub(crate) fn check_var_bounds(num_vars: u32) -> Result<(), ReduceError> {
    if num_vars < 1 {
        return Err(ReduceError::TooFewVariables { num_vars });
    }
    if num_vars > usize::BITS {
        return Err(ReduceError::TooManyVariables {
            num_vars,
            max: usize::BITS,
        });
    }
    Ok(())
}

/// Like [`check_var_bounds`], and also returns the number of minterms in a table over
/// `num_vars` variables.
pub(crate) fn check_num_vars(num_vars: u32) -> Result<usize, ReduceError> {
    check_var_bounds(num_vars)?;
    1_usize.checked_shl(num_vars).ok_or_else(|| {
        ReduceError::InvalidArgument(format!(
            "a truth table over {} variables does not fit in memory",
            num_vars
        ))
    })
}
