// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Leading eigenvalues
//!
//! The ladder `χ = (1 - K)⁻¹ χ₀` diverges when an eigenvalue of the kernel `K = χ₀Γ` reaches one.
//! Tracking the dominant eigenvalue as a function of the transfer frequency `W` and momentum
//! `q` therefore locates the leading instability of the system.

use crate::bethe_salpeter::{ConvolutionOrder, Forward};
use crate::bubbles::calc_bubbles;
use crate::error::{check_dimensions, BuildError, EigenError};
use ladder_mesher::{BosonicPoint, GkField, MomentumField, Vertex, WqField};
use nalgebra::{DMatrix, DVector};
use ndarray::IxDyn;
use num_complex::Complex64;
use rayon::prelude::*;
use serde::Deserialize;
use std::cmp::Ordering;

const MAX_INVERSE_ITERATIONS: usize = 100;
const INVERSE_ITERATION_TOLERANCE: f64 = 1e-8;

/// Criterion used to pick the dominant eigenvalue of a kernel
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EigenvalueOrdering {
    /// The eigenvalue closest to crossing one along the real axis
    LargestRealPart,
    LargestMagnitude,
}

impl Default for EigenvalueOrdering {
    fn default() -> Self {
        Self::LargestRealPart
    }
}

impl EigenvalueOrdering {
    fn score(&self, value: &Complex64) -> f64 {
        match self {
            Self::LargestRealPart => value.re,
            Self::LargestMagnitude => value.norm(),
        }
    }

    /// Ranks two eigenvalues, the greater one is the more dominant
    pub fn compare(&self, a: &Complex64, b: &Complex64) -> Ordering {
        self.score(a).total_cmp(&self.score(b))
    }

    /// The highest ranked of `values`, `None` if there are none
    pub fn leading<I: IntoIterator<Item = Complex64>>(&self, values: I) -> Option<Complex64> {
        values.into_iter().max_by(|a, b| self.compare(a, b))
    }
}

/// An eigenvalue of a kernel and its unit-norm right eigenvector
#[derive(Clone, Debug)]
pub struct Eigenpair {
    pub value: Complex64,
    pub vector: DVector<Complex64>,
}

/// All eigenvalues of a square matrix from its Schur decomposition
pub fn kernel_eigenvalues(kernel: &DMatrix<Complex64>) -> Result<Vec<Complex64>, EigenError> {
    let dimension = kernel.nrows();
    if dimension <= 1 {
        return Ok(kernel.iter().copied().collect());
    }
    kernel
        .eigenvalues()
        .map(|values| values.iter().copied().collect())
        .ok_or(EigenError::NoConvergence(dimension))
}

/// All eigenvalues of the ladder kernel built from `chi0` and `gamma` in the given order
pub fn eigenvalues<Direction: ConvolutionOrder>(
    chi0: &DMatrix<Complex64>,
    gamma: &DMatrix<Complex64>,
) -> Result<Vec<Complex64>, EigenError> {
    check_dimensions(chi0, gamma)?;
    kernel_eigenvalues(&Direction::kernel(chi0, gamma))
}

/// The dominant eigenvalue of `χ₀Γ`
pub fn max_eigenvalue(
    chi0: &DMatrix<Complex64>,
    gamma: &DMatrix<Complex64>,
    ordering: EigenvalueOrdering,
) -> Result<Complex64, EigenError> {
    let values = eigenvalues::<Forward>(chi0, gamma)?;
    ordering
        .leading(values)
        .ok_or(EigenError::NoConvergence(chi0.nrows()))
}

/// The dominant eigenvalue of `kernel` together with its eigenvector
///
/// The eigenvector is found by inverse iteration with a shift just off the eigenvalue, starting
/// from a vector with no vanishing components.
pub fn leading_eigenpair(
    kernel: &DMatrix<Complex64>,
    ordering: EigenvalueOrdering,
) -> Result<Eigenpair, EigenError> {
    let dimension = kernel.nrows();
    if !kernel.is_square() {
        return Err(BuildError::NonSquare {
            rows: kernel.nrows(),
            columns: kernel.ncols(),
        }
        .into());
    }
    let value = ordering
        .leading(kernel_eigenvalues(kernel)?)
        .ok_or(BuildError::Empty)?;

    let scale = 1. + value.norm();
    let shift = value + Complex64::new(1e-10 * scale, 0.);
    let decomposition =
        (kernel - DMatrix::<Complex64>::identity(dimension, dimension) * shift).lu();

    let mut vector = DVector::from_fn(dimension, |j, _| {
        Complex64::from(1. + j as f64 / dimension as f64)
    })
    .normalize();
    for iteration in 0..MAX_INVERSE_ITERATIONS {
        vector = decomposition
            .solve(&vector)
            .ok_or(EigenError::NoConvergence(dimension))?
            .normalize();
        let residual = (kernel * &vector - &vector * value).norm();
        if residual < INVERSE_ITERATION_TOLERANCE * scale {
            tracing::trace!("Inverse iteration converged after {} steps", iteration + 1);
            return Ok(Eigenpair { value, vector });
        }
    }
    Err(EigenError::NoConvergence(dimension))
}

/// Momentum resolved dominant eigenvalue of `diag(χ₀(·, q; W)) Γ(W)`
///
/// `bubbles` is the bubble at transfer frequency `w` and must share its fermionic grid with the
/// vertex. The result has the shape of the momentum grid.
#[tracing::instrument(name = "Leading eigenvalues", level = "debug", skip_all, fields(W = w.n()))]
pub fn leading_eigenvalues_at<const D: usize>(
    bubbles: &GkField<D>,
    vertex: &Vertex,
    w: &BosonicPoint,
    ordering: EigenvalueOrdering,
) -> Result<MomentumField, EigenError> {
    check_grids(bubbles, vertex)?;
    let gamma = vertex.as_matrix(w)?;

    let values = (0..bubbles.knorm())
        .into_par_iter()
        .map(|k| max_eigenvalue(&bubbles.frequency_diagonal_at(k), &gamma, ordering))
        .collect::<Result<Vec<_>, _>>()?;

    let shape = bubbles.momentum_grid().shape();
    MomentumField::from_shape_vec(IxDyn(&shape), values)
        .map_err(|e| BuildError::GridMismatch(e.to_string()).into())
}

/// Dominant eigenvalue at every bosonic frequency of `vertex` and every momentum of `gf`
pub fn leading_eigenvalues<const D: usize>(
    gf: &GkField<D>,
    vertex: &Vertex,
    ordering: EigenvalueOrdering,
) -> Result<WqField<D>, EigenError> {
    check_grids(gf, vertex)?;
    let mut out = WqField::zeros(vertex.bosonic_grid().clone(), gf.momentum_grid().clone());
    for w in vertex.bosonic_grid().points() {
        let bubbles = calc_bubbles(gf, &w);
        let values = leading_eigenvalues_at(&bubbles, vertex, &w, ordering)?;
        out.slice_mut(w.index()).assign(&values);
        tracing::debug!(
            "W = {}: leading eigenvalue {}",
            w.n(),
            ordering.leading(values.iter().copied()).unwrap_or_default()
        );
    }
    Ok(out)
}

fn check_grids<const D: usize>(gf: &GkField<D>, vertex: &Vertex) -> Result<(), BuildError> {
    if gf.frequency_grid() != vertex.fermionic_grid() {
        return Err(BuildError::GridMismatch(format!(
            "the field is defined on {:?} but the vertex on {:?}",
            gf.frequency_grid(),
            vertex.fermionic_grid()
        )));
    }
    Ok(())
}
