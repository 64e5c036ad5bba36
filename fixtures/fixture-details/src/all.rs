// Copyright (c) The qm-shrink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::value_generator::ValueGenerator;
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{eyre::WrapErr, Result};
use log::{debug, info};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use qm_shrink::TruthTable;
use std::fs;

/// On-disk fixtures: random truth tables under `inputs/` and their reductions under `outputs/`.
///
/// Each input file holds one table in the `0`/`1`/`-` form. Each output file holds the
/// equation on the first line followed by the cubes in matrix form.
pub struct AllFixtures {
    dir: Utf8PathBuf,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

const INPUT_EXTENSION: &str = "tt";
const OUTPUT_EXTENSION: &str = "sop";

impl AllFixtures {
    pub fn get() -> &'static Self {
        &ALL_FIXTURES_STATIC
    }

    /// Uses `dir` instead of the default `fixtures/data` directory.
    pub fn with_dir(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn init() -> Self {
        let dir: Utf8PathBuf = env!("CARGO_MANIFEST_DIR").into();
        let dir = dir
            .parent()
            .expect("fixture-details lives inside the fixtures directory")
            .join("data");
        Self { dir }
    }

    #[inline]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    #[inline]
    pub fn inputs_dir(&self) -> Utf8PathBuf {
        self.dir.join("inputs")
    }

    #[inline]
    pub fn outputs_dir(&self) -> Utf8PathBuf {
        self.dir.join("outputs")
    }

    /// Writes `count` random tables over `num_vars` variables.
    pub fn generate_inputs(&self, count: usize, num_vars: u32) -> Result<()> {
        let mut value_gen = ValueGenerator::from_seed(format!("qm-shrink_{}", num_vars));
        let strategy = any_with::<TruthTable>(Some((num_vars, num_vars)));

        let inputs_dir = self.inputs_dir();
        fs::create_dir_all(&inputs_dir)
            .wrap_err_with(|| format!("failed to create {}", inputs_dir))?;

        for ix in 0..count {
            let mut gen = value_gen.partial_clone();
            let table = gen.generate(&strategy);
            let path = inputs_dir.join(format!("{:02}-{:04}.{}", num_vars, ix, INPUT_EXTENSION));
            debug!("writing {}", path);
            fs::write(&path, format!("{}\n", table))
                .wrap_err_with(|| format!("failed to write {}", path))?;
        }

        info!("wrote {} inputs to {}", count, inputs_dir);
        Ok(())
    }

    /// Reduces every input table and writes the result next to it under `outputs/`.
    pub fn generate_outputs(&self) -> Result<usize> {
        let outputs_dir = self.outputs_dir();
        fs::create_dir_all(&outputs_dir)
            .wrap_err_with(|| format!("failed to create {}", outputs_dir))?;

        let inputs = self.input_paths()?;
        for input in &inputs {
            let table = read_table(input)?;
            let sop = table
                .reduce()
                .wrap_err_with(|| format!("failed to reduce {}", input))?;
            if let Err(minterm) = sop.check_against(&table) {
                color_eyre::eyre::bail!("{}: reduction is wrong at minterm {}", input, minterm);
            }

            let stem = input.file_stem().unwrap_or_default();
            let path = outputs_dir.join(format!("{}.{}", stem, OUTPUT_EXTENSION));
            debug!("writing {}", path);
            fs::write(
                &path,
                format!("{}\n{}", sop.equation(), sop.matrix_display()),
            )
            .wrap_err_with(|| format!("failed to write {}", path))?;
        }

        info!("wrote {} outputs to {}", inputs.len(), outputs_dir);
        Ok(inputs.len())
    }

    /// Returns the input table files, sorted by name.
    pub fn input_paths(&self) -> Result<Vec<Utf8PathBuf>> {
        let inputs_dir = self.inputs_dir();
        let mut paths = Vec::new();
        for entry in inputs_dir
            .read_dir_utf8()
            .wrap_err_with(|| format!("failed to read {}", inputs_dir))?
        {
            let entry = entry.wrap_err_with(|| format!("failed to read {}", inputs_dir))?;
            if entry.path().extension() == Some(INPUT_EXTENSION) {
                paths.push(entry.into_path());
            }
        }
        paths.sort();
        Ok(paths)
    }
}

fn read_table(path: &Utf8Path) -> Result<TruthTable> {
    let contents = fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path))?;
    contents
        .trim()
        .parse()
        .wrap_err_with(|| format!("failed to parse truth table in {}", path))
}
