// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::ReduceError;
use std::fmt;

/// One truth table entry: false, true, or "either value is acceptable".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TriLogic {
    False = 0,
    True = 1,
    DontCare = 2,
}

impl TriLogic {
    /// Uses the numeric representation `0`, `1`, `2`.
    pub fn from_numeric(numeric: u8) -> Result<Self, ReduceError> {
        match numeric {
            0 => Ok(Self::False),
            1 => Ok(Self::True),
            2 => Ok(Self::DontCare),
            other => Err(ReduceError::InvalidArgument(format!(
                "truth table value {} is not 0, 1 or 2",
                other
            ))),
        }
    }

    #[inline]
    pub fn is_false(self) -> bool {
        matches!(self, Self::False)
    }

    #[inline]
    pub fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    #[inline]
    pub fn is_dont_care(self) -> bool {
        matches!(self, Self::DontCare)
    }

    /// Returns true if `value` is an acceptable output for this entry.
    #[inline]
    pub fn accepts(self, value: bool) -> bool {
        match self {
            Self::False => !value,
            Self::True => value,
            Self::DontCare => true,
        }
    }

    /// The character used by the textual truth table format.
    pub fn char(self) -> char {
        match self {
            Self::False => '0',
            Self::True => '1',
            Self::DontCare => '-',
        }
    }

    pub(crate) fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(Self::False),
            '1' => Some(Self::True),
            '-' | '2' | 'x' | 'X' => Some(Self::DontCare),
            _ => None,
        }
    }
}

impl From<bool> for TriLogic {
    #[inline]
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl fmt::Display for TriLogic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}
