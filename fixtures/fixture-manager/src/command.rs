// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use fixture_details::{AllFixtures, SweepReport, Sweeps};
use log::{error, info};
use qm_shrink::{FilterStats, TruthTable};
use simplelog::LevelFilter;

#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    /// Log more (-v for debug, -vv for trace)
    #[clap(long, short, global = true, parse(from_occurrences))]
    verbose: u8,

    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Reduce a single truth table and print the result
    Show {
        /// Table entries as 0, 1 and - characters, minterm 0 first
        #[clap(long, short)]
        table: String,

        /// Comma-separated variable names, most significant variable first
        #[clap(long, short)]
        names: Option<String>,
    },
    /// Reduce every Boolean truth table up to a small variable count
    Exhaustive {
        #[clap(long, default_value_t = 1)]
        min_vars: u32,
        #[clap(long, default_value_t = 4)]
        max_vars: u32,
    },
    /// Reduce every table that is true except at a single minterm
    OneFalse {
        #[clap(long, default_value_t = 1)]
        min_vars: u32,
        #[clap(long, default_value_t = 12)]
        max_vars: u32,
    },
    /// Reduce every table that is false except at a single minterm
    OneTrue {
        #[clap(long, default_value_t = 1)]
        min_vars: u32,
        #[clap(long, default_value_t = 12)]
        max_vars: u32,
    },
    /// Reduce seeded random tables
    Random {
        #[clap(long, short, default_value_t = 10)]
        count: usize,
        #[clap(long, default_value_t = 13)]
        min_vars: u32,
        #[clap(long, default_value_t = 15)]
        max_vars: u32,
        #[clap(long, default_value = "qm-shrink")]
        seed: String,
    },
    /// Write random truth tables to the fixtures directory
    GenerateInputs {
        #[clap(long, short, default_value_t = 64)]
        count: usize,
        #[clap(long, default_value_t = 6)]
        num_vars: u32,
    },
    /// Reduce the generated truth tables and write the equations
    GenerateOutputs,
}

impl FixtureManagerApp {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn exec(self) -> Result<()> {
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::Show { table, names } => show(&table, names.as_deref()),
            Self::Exhaustive { min_vars, max_vars } => {
                print_report(Sweeps::exhaustive(min_vars..=max_vars)?)
            }
            Self::OneFalse { min_vars, max_vars } => {
                print_report(Sweeps::one_false(min_vars..=max_vars)?)
            }
            Self::OneTrue { min_vars, max_vars } => {
                print_report(Sweeps::one_true(min_vars..=max_vars)?)
            }
            Self::Random {
                count,
                min_vars,
                max_vars,
                seed,
            } => print_report(Sweeps::random(count, min_vars..=max_vars, &seed)?),
            Self::GenerateInputs { count, num_vars } => {
                AllFixtures::get().generate_inputs(count, num_vars)
            }
            Self::GenerateOutputs => {
                let count = AllFixtures::get().generate_outputs()?;
                info!("reduced {} tables", count);
                Ok(())
            }
        }
    }
}

fn show(table: &str, names: Option<&str>) -> Result<()> {
    let table: TruthTable = table.parse().wrap_err("invalid truth table")?;
    let mut stats = FilterStats::new();
    let sop = table.reduce_with_stats(&mut stats)?;

    let names: Option<Vec<&str>> = names.map(|names| names.split(',').map(str::trim).collect());
    println!("{}", sop.render_equation(names.as_deref())?);
    println!();
    print!("{}", sop.matrix_display());
    println!();
    println!("Terms kept    : {}", stats.kept());
    println!("Terms removed : {}", stats.removed());

    info!("{} variables, {} terms", sop.num_vars(), sop.cube_count());
    if let Err(minterm) = sop.check_against(&table) {
        bail!("reduction disagrees with the table at minterm {}", minterm);
    }
    Ok(())
}

fn print_report(report: SweepReport) -> Result<()> {
    println!("{}", report);
    if !report.is_success() {
        error!(
            "{} wrong answers and {} failures",
            report.score.wrong, report.failures
        );
        bail!("some reductions were wrong or failed");
    }
    Ok(())
}
