// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::value_generator::ValueGenerator;
use color_eyre::{eyre::bail, Result};
use log::{info, warn};
use proptest::prelude::*;
use qm_shrink::{FilterStats, Score, TriLogic, TruthTable};
use std::{
    fmt,
    ops::RangeInclusive,
    time::{Duration, Instant},
};

/// Largest variable count for which every Boolean table is enumerated (2^16 tables).
pub const MAX_EXHAUSTIVE_VARS: u32 = 4;

/// Totals gathered while reducing and checking a batch of truth tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepReport {
    pub tables: usize,
    pub score: Score,
    pub failures: usize,
    pub stats: FilterStats,
    pub elapsed: Duration,
}

impl SweepReport {
    /// Reduces `table`, checks every entry and adds the outcome to the totals.
    pub fn record(&mut self, table: &TruthTable) {
        self.tables += 1;
        match table.reduce_with_stats(&mut self.stats) {
            Ok(sop) => {
                let score = sop.score(table);
                if score.wrong != 0 {
                    warn!(
                        "{} reduced to {} with {} wrong answers",
                        table,
                        sop.equation(),
                        score.wrong
                    );
                }
                self.score += score;
            }
            Err(err) => {
                warn!("reducing {} failed: {}", table, err);
                self.failures += 1;
            }
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.score.wrong == 0 && self.failures == 0
    }

    fn timed(f: impl FnOnce(&mut Self) -> Result<()>) -> Result<Self> {
        let mut report = Self::default();
        let start = Instant::now();
        f(&mut report)?;
        report.elapsed = start.elapsed();
        Ok(report)
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Tables          : {}", self.tables)?;
        writeln!(f, "Number right    : {}", self.score.right)?;
        writeln!(f, "Number wrong    : {}", self.score.wrong)?;
        writeln!(f, "Number failures : {}", self.failures)?;
        writeln!(f, "Terms kept      : {}", self.stats.kept())?;
        writeln!(f, "Terms removed   : {}", self.stats.removed())?;
        write!(f, "Elapsed         : {:?}", self.elapsed)
    }
}

/// The batches of truth tables used to exercise the reducer.
pub struct Sweeps;

impl Sweeps {
    /// Every Boolean (don't-care free) table for each variable count in `vars`.
    pub fn exhaustive(vars: RangeInclusive<u32>) -> Result<SweepReport> {
        check_vars(&vars)?;
        if *vars.end() > MAX_EXHAUSTIVE_VARS {
            bail!(
                "exhaustive sweeps support at most {} variables, got {}",
                MAX_EXHAUSTIVE_VARS,
                vars.end()
            );
        }

        SweepReport::timed(|report| {
            for num_vars in vars {
                let table_count = 1_u64 << (1_u32 << num_vars);
                info!("{} variables: {} truth tables", num_vars, table_count);
                for bits in 0..table_count {
                    let table = TruthTable::from_fn(num_vars, |m| ((bits >> m) & 1 == 1).into())?;
                    report.record(&table);
                }
            }
            Ok(())
        })
    }

    /// For each minterm, the table that is true everywhere except at that minterm.
    pub fn one_false(vars: RangeInclusive<u32>) -> Result<SweepReport> {
        Self::single_minterm(vars, TriLogic::True, TriLogic::False)
    }

    /// For each minterm, the table that is false everywhere except at that minterm.
    pub fn one_true(vars: RangeInclusive<u32>) -> Result<SweepReport> {
        Self::single_minterm(vars, TriLogic::False, TriLogic::True)
    }

    /// `count` random tables, with variable counts drawn from `vars`.
    pub fn random(count: usize, vars: RangeInclusive<u32>, seed: &str) -> Result<SweepReport> {
        check_vars(&vars)?;
        let strategy = any_with::<TruthTable>(Some((*vars.start(), *vars.end())));
        let mut value_gen = ValueGenerator::from_seed(seed);

        SweepReport::timed(|report| {
            for test_ix in 0..count {
                let table = value_gen.generate(&strategy);
                info!("test {} with {} variables", test_ix + 1, table.num_vars());
                report.record(&table);
            }
            Ok(())
        })
    }

    fn single_minterm(
        vars: RangeInclusive<u32>,
        background: TriLogic,
        special: TriLogic,
    ) -> Result<SweepReport> {
        check_vars(&vars)?;
        SweepReport::timed(|report| {
            for num_vars in vars {
                info!("{} variables", num_vars);
                for special_ix in 0..(1_usize << num_vars) {
                    let table = TruthTable::from_fn(num_vars, |m| {
                        if m == special_ix {
                            special
                        } else {
                            background
                        }
                    })?;
                    report.record(&table);
                }
            }
            Ok(())
        })
    }
}

/// Largest variable count the sweeps will allocate tables for.
const MAX_SWEEP_VARS: u32 = 24;

fn check_vars(vars: &RangeInclusive<u32>) -> Result<()> {
    if vars.is_empty() || *vars.start() < 1 {
        bail!("invalid variable range {:?}", vars);
    }
    if *vars.end() > MAX_SWEEP_VARS {
        bail!(
            "sweeps support at most {} variables, got {}",
            MAX_SWEEP_VARS,
            vars.end()
        );
    }
    Ok(())
}
