// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::{check_num_vars, ReduceError},
    primes::FilterStats,
    sum_of_products::SumOfProducts,
    tri_logic::TriLogic,
};
use std::{fmt, ops::Index, str::FromStr};

/// The outputs of a single-output Boolean function, one entry per minterm.
///
/// The index of an entry is its minterm: variable 0 is the most significant of the `num_vars`
/// bits. For three variables, entry 4 (`0b100`) is `Var1 = 1, Var2 = 0, Var3 = 0`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TruthTable {
    num_vars: u32,
    values: Vec<TriLogic>,
}

impl TruthTable {
    pub fn new(num_vars: u32, values: Vec<TriLogic>) -> Result<Self, ReduceError> {
        check_table(values.len(), num_vars)?;
        Ok(Self { num_vars, values })
    }

    /// Builds a truth table from the numeric representation `0`, `1`, `2`.
    pub fn from_numeric(
        num_vars: u32,
        numeric: impl IntoIterator<Item = u8>,
    ) -> Result<Self, ReduceError> {
        let values = numeric
            .into_iter()
            .map(TriLogic::from_numeric)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(num_vars, values)
    }

    /// Builds a truth table by evaluating `f` at every minterm.
    pub fn from_fn(
        num_vars: u32,
        mut f: impl FnMut(usize) -> TriLogic,
    ) -> Result<Self, ReduceError> {
        let len = check_num_vars(num_vars)?;
        let mut values = Vec::new();
        values.try_reserve_exact(len)?;
        values.extend((0..len).map(&mut f));
        Ok(Self { num_vars, values })
    }

    #[inline]
    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// Returns the number of minterms, `2^num_vars`.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, minterm: usize) -> Option<TriLogic> {
        self.values.get(minterm).copied()
    }

    #[inline]
    pub fn values(&self) -> &[TriLogic] {
        &self.values
    }

    /// Returns the minterms whose output is true, in ascending order.
    pub fn true_minterms(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(minterm, value)| value.is_true().then(|| minterm))
    }

    #[inline]
    pub fn reduce(&self) -> Result<SumOfProducts, ReduceError> {
        crate::reduce(&self.values, self.num_vars)
    }

    #[inline]
    pub fn reduce_with_stats(&self, stats: &mut FilterStats) -> Result<SumOfProducts, ReduceError> {
        crate::reduce_with_stats(&self.values, self.num_vars, stats)
    }
}

/// Validates a raw table against its variable count.
pub(crate) fn check_table(len: usize, num_vars: u32) -> Result<(), ReduceError> {
    let expected = check_num_vars(num_vars)?;
    if len != expected {
        return Err(ReduceError::InvalidArgument(format!(
            "truth table over {} variables must have {} entries, found {}",
            num_vars, expected, len
        )));
    }
    Ok(())
}

impl Index<usize> for TruthTable {
    type Output = TriLogic;

    #[inline]
    fn index(&self, minterm: usize) -> &TriLogic {
        &self.values[minterm]
    }
}

/// Displays the table as one character per minterm: `0`, `1` or `-`.
impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for value in &self.values {
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl FromStr for TruthTable {
    type Err = ReduceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .chars()
            .filter(|ch| !ch.is_whitespace() && *ch != '_')
            .map(|ch| {
                TriLogic::from_char(ch).ok_or_else(|| {
                    ReduceError::InvalidArgument(format!("unexpected truth table character {:?}", ch))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() < 2 || !values.len().is_power_of_two() {
            return Err(ReduceError::InvalidArgument(format!(
                "truth table length {} is not a power of two of at least 2",
                values.len()
            )));
        }
        let num_vars = values.len().trailing_zeros();
        Self::new(num_vars, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        assert_eq!(
            TruthTable::new(0, vec![TriLogic::True]),
            Err(ReduceError::TooFewVariables { num_vars: 0 })
        );
        assert!(matches!(
            TruthTable::new(2, vec![TriLogic::True; 3]),
            Err(ReduceError::InvalidArgument(_))
        ));
        assert!(matches!(
            TruthTable::from_numeric(1, [0, 3]),
            Err(ReduceError::InvalidArgument(_))
        ));
        assert_eq!(
            TruthTable::new(MAX_PLUS_ONE, vec![]),
            Err(ReduceError::TooManyVariables {
                num_vars: MAX_PLUS_ONE,
                max: usize::BITS,
            })
        );
    }

    const MAX_PLUS_ONE: u32 = usize::BITS + 1;

    #[test]
    fn test_from_fn() {
        let table = TruthTable::from_fn(3, |m| (m.count_ones() % 2 == 1).into()).unwrap();
        assert_eq!(table.num_vars(), 3);
        assert_eq!(table.len(), 8);
        assert_eq!(table.to_string(), "01101001");
        assert_eq!(table.true_minterms().collect::<Vec<_>>(), vec![1, 2, 4, 7]);
        assert_eq!(table[7], TriLogic::True);
        assert_eq!(table.get(8), None);
    }

    #[test]
    fn test_parse() {
        let table: TruthTable = "0001_11-1".parse().unwrap();
        assert_eq!(table.num_vars(), 3);
        assert_eq!(table.get(6), Some(TriLogic::DontCare));
        assert_eq!(table.to_string(), "000111-1");

        assert!("011".parse::<TruthTable>().is_err());
        assert!("1".parse::<TruthTable>().is_err());
        assert!("01a1".parse::<TruthTable>().is_err());
    }
}
