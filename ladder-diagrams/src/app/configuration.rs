// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use crate::bethe_salpeter::SolveSettings;
use crate::eigen::EigenvalueOrdering;
use color_eyre::eyre::eyre;
use config::{Config, File, FileFormat};
use nalgebra::RealField;
use serde::{de::DeserializeOwned, Deserialize};
use std::{env, path::Path};

const DEFAULT_CONFIGURATION: &str = include_str!("../../.config/default.toml");

#[derive(Debug, Deserialize)]
pub struct Configuration<T> {
    pub grid: GridConfiguration<T>,
    pub lattice: LatticeConfiguration<T>,
    pub vertex: VertexConfiguration<T>,
    pub solver: SolverConfiguration<T>,
    pub eigen: EigenConfiguration,
    pub telemetry: TelemetryConfiguration,
}

#[derive(Debug, Deserialize)]
pub struct GridConfiguration<T> {
    pub beta: T,
    /// Number of positive fermionic frequencies, the grid is symmetric about zero
    pub fermionic_frequencies: usize,
    pub bosonic_frequencies: usize,
    /// Points along each momentum axis
    pub momentum_points: usize,
}

#[derive(Debug, Deserialize)]
pub struct LatticeConfiguration<T> {
    pub hopping: T,
    pub chemical_potential: T,
}

#[derive(Debug, Deserialize)]
pub struct VertexConfiguration<T> {
    /// The constant bare interaction `U`
    pub interaction: T,
}

#[derive(Debug, Deserialize)]
pub struct SolverConfiguration<T> {
    pub eval_iterations: bool,
    pub iterations: usize,
    pub mix: T,
    pub only_order_n: bool,
    pub verbosity: u32,
    /// Solve `χ₀Γ` ordered ladders when true and `Γχ₀` otherwise
    pub forward: bool,
}

#[derive(Debug, Deserialize)]
pub struct EigenConfiguration {
    pub ordering: EigenvalueOrdering,
}

#[derive(Debug, Deserialize)]
pub struct TelemetryConfiguration {
    pub directory: String,
    pub file_name: String,
}

impl<T: Copy + RealField> SolverConfiguration<T> {
    pub fn settings(&self) -> SolveSettings<T> {
        SolveSettings {
            eval_iterations: self.eval_iterations,
            n_iter: self.iterations,
            mix: self.mix,
            only_order_n: self.only_order_n,
        }
    }
}

impl<T: DeserializeOwned> Configuration<T> {
    /// Layers the built-in defaults, the `RUN_MODE` overrides and an optional user file
    pub fn build(user_file: Option<&Path>) -> color_eyre::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // The default settings for the calculation
            .add_source(File::from_str(DEFAULT_CONFIGURATION, FileFormat::Toml))
            // Overrides for the run mode, optional
            .add_source(File::with_name(&format!(".config/{}", run_mode)).required(false));
        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path));
        }

        builder
            .build()?
            .try_deserialize()
            .map_err(|e| eyre!(format!("Failed to deserialize the config file: {:?}", e)))
    }
}
