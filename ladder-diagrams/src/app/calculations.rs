// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Calculations
//!
//! Delegated function from `App` running a ladder calculation on a hypercubic lattice with a
//! constant bare vertex
//!

use super::Configuration;
use crate::{
    bethe_salpeter::{Backward, BetheSalpeterBuilder, ConvolutionOrder, Forward, SolveSettings},
    bubbles::calc_bubbles,
    eigen::leading_eigenvalues,
    lattice::{greens_function, HypercubicLattice},
};
use itertools::Itertools;
use ladder_mesher::{BosonicGrid, FermionicGrid, MomentumGrid, Vertex};
use nalgebra::DMatrix;
use num_complex::Complex64;

pub(crate) fn run_calculation<const D: usize>(
    config: &Configuration<f64>,
) -> color_eyre::Result<()> {
    let term = console::Term::stdout();
    term.write_line(&format!("Ladder calculation on a {}d hypercubic lattice", D))?;

    let beta = config.grid.beta;
    let fermionic_grid = FermionicGrid::symmetric(beta, config.grid.fermionic_frequencies)?;
    let bosonic_grid = BosonicGrid::symmetric(beta, config.grid.bosonic_frequencies)?;
    let momentum_grid = MomentumGrid::<D>::uniform(config.grid.momentum_points)?;
    tracing::info!(
        "β = {}, {} fermionic and {} bosonic frequencies, {} momenta",
        beta,
        fermionic_grid.len(),
        bosonic_grid.len(),
        momentum_grid.len()
    );

    let lattice = HypercubicLattice::<D>::new(config.lattice.hopping);
    let gf = greens_function(
        &lattice,
        fermionic_grid.clone(),
        momentum_grid.clone(),
        config.lattice.chemical_potential,
    );
    let vertex = Vertex::constant(
        bosonic_grid.clone(),
        fermionic_grid,
        Complex64::from(config.vertex.interaction),
    );

    let settings = config.solver.settings();
    for w in bosonic_grid.points() {
        let bubbles = calc_bubbles(&gf, &w);
        // q = 0 sits at the origin of the momentum grid
        let chi0 = bubbles.frequency_diagonal_at(0);
        let gamma = vertex.as_matrix(&w)?;
        let (chi, determinant) = match config.solver.forward {
            true => solve_at::<Forward>(&chi0, &gamma, &settings, config.solver.verbosity)?,
            false => solve_at::<Backward>(&chi0, &gamma, &settings, config.solver.verbosity)?,
        };
        tracing::info!("W = {}: Σ χ(q = 0) = {}", w.n(), chi.sum());
        if !settings.eval_iterations {
            tracing::info!("W = {}: det(1 - K) = {}", w.n(), determinant);
        }
    }

    let ordering = config.eigen.ordering;
    let eigenvalues = leading_eigenvalues(&gf, &vertex, ordering)?;
    for w in bosonic_grid.points() {
        let slice = eigenvalues.slice(w.index());
        let at_origin = eigenvalues.get(w.index(), 0);
        tracing::info!("W = {}: leading eigenvalue at q = 0 is {}", w.n(), at_origin);
        if let Some(position) = slice.iter().position_max_by(|a, b| ordering.compare(a, b)) {
            tracing::info!(
                "W = {}: leading eigenvalue {} at q = {:?}",
                w.n(),
                eigenvalues.get(w.index(), position),
                momentum_grid.point(position)
            );
        }
    }
    Ok(())
}

fn solve_at<Direction: ConvolutionOrder>(
    chi0: &DMatrix<Complex64>,
    gamma: &DMatrix<Complex64>,
    settings: &SolveSettings<f64>,
    verbosity: u32,
) -> color_eyre::Result<(DMatrix<Complex64>, Complex64)> {
    let mut solver = BetheSalpeterBuilder::new()
        .with_bubble(chi0)
        .with_vertex(gamma)
        .with_verbosity(verbosity)
        .build::<Direction>()?;
    let chi = solver.solve_with(settings)?;
    Ok((chi, solver.determinant()))
}
