// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Grid Fields
//!
//! Complex fields over a Matsubara grid and a momentum grid. The storage is an `ndarray`
//! array of shape `[n_frequency, k_1, .., k_D]` which is fixed at construction.

use crate::{Bosonic, Fermionic, GridError, MatsubaraGrid, MatsubaraPoint, MomentumGrid, Statistics};
use nalgebra::{DMatrix, DVector};
use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, Axis, IxDyn};
use num_complex::Complex64;
use num_traits::Zero;

/// A complex field over `(iω, k_1, .., k_D)`
#[derive(Clone, Debug, PartialEq)]
pub struct GridField<S, const D: usize> {
    frequency_grid: MatsubaraGrid<S>,
    momentum_grid: MomentumGrid<D>,
    data: ArrayD<Complex64>,
}

/// Fields over fermionic frequencies: Green's functions and bubbles
pub type GkField<const D: usize> = GridField<Fermionic, D>;
/// Fields over bosonic frequencies, such as the leading eigenvalue at each transfer frequency
pub type WqField<const D: usize> = GridField<Bosonic, D>;
/// A field over momentum alone, the slice of a `GridField` at one frequency
pub type MomentumField = ArrayD<Complex64>;

impl<S: Statistics, const D: usize> GridField<S, D> {
    fn shape_of(frequency_grid: &MatsubaraGrid<S>, momentum_grid: &MomentumGrid<D>) -> Vec<usize> {
        std::iter::once(frequency_grid.len())
            .chain(momentum_grid.shape())
            .collect()
    }

    pub fn zeros(frequency_grid: MatsubaraGrid<S>, momentum_grid: MomentumGrid<D>) -> Self {
        let shape = Self::shape_of(&frequency_grid, &momentum_grid);
        Self {
            frequency_grid,
            momentum_grid,
            data: ArrayD::zeros(IxDyn(&shape)),
        }
    }

    /// Evaluates `f` at every frequency and momentum point
    pub fn from_fn<F>(
        frequency_grid: MatsubaraGrid<S>,
        momentum_grid: MomentumGrid<D>,
        mut f: F,
    ) -> Self
    where
        F: FnMut(MatsubaraPoint<S>, [f64; D]) -> Complex64,
    {
        let mut field = Self::zeros(frequency_grid, momentum_grid);
        for point in field.frequency_grid.points() {
            let mut slice = field.data.index_axis_mut(Axis(0), point.index());
            for (value, k) in slice.iter_mut().zip(field.momentum_grid.points()) {
                *value = f(point, k);
            }
        }
        field
    }

    pub fn from_array(
        frequency_grid: MatsubaraGrid<S>,
        momentum_grid: MomentumGrid<D>,
        data: ArrayD<Complex64>,
    ) -> Result<Self, GridError> {
        let expected = Self::shape_of(&frequency_grid, &momentum_grid);
        if data.shape() != expected.as_slice() {
            return Err(GridError::ShapeMismatch {
                expected,
                found: data.shape().to_vec(),
            });
        }
        Ok(Self {
            frequency_grid,
            momentum_grid,
            data: data.as_standard_layout().into_owned(),
        })
    }

    pub fn grids(&self) -> (&MatsubaraGrid<S>, &MomentumGrid<D>) {
        (&self.frequency_grid, &self.momentum_grid)
    }

    pub fn frequency_grid(&self) -> &MatsubaraGrid<S> {
        &self.frequency_grid
    }

    pub fn momentum_grid(&self) -> &MomentumGrid<D> {
        &self.momentum_grid
    }

    pub fn data(&self) -> &ArrayD<Complex64> {
        &self.data
    }

    pub fn into_data(self) -> ArrayD<Complex64> {
        self.data
    }

    /// Number of momentum points in each frequency slice
    pub fn knorm(&self) -> usize {
        self.momentum_grid.len()
    }

    /// The momentum-space slice at frequency position `index`
    ///
    /// # Panics
    /// If `index` is outside the frequency grid
    pub fn slice(&self, index: usize) -> ArrayViewD<'_, Complex64> {
        self.data.index_axis(Axis(0), index)
    }

    /// # Panics
    /// If `index` is outside the frequency grid
    pub fn slice_mut(&mut self, index: usize) -> ArrayViewMutD<'_, Complex64> {
        self.data.index_axis_mut(Axis(0), index)
    }

    /// Value at frequency position `frequency_index` and flat momentum index `k_index`
    pub fn get(&self, frequency_index: usize, k_index: usize) -> Complex64 {
        self.data[self.full_index(frequency_index, k_index).as_slice()]
    }

    pub fn set(&mut self, frequency_index: usize, k_index: usize, value: Complex64) {
        let index = self.full_index(frequency_index, k_index);
        self.data[index.as_slice()] = value;
    }

    fn full_index(&self, frequency_index: usize, k_index: usize) -> Vec<usize> {
        std::iter::once(frequency_index)
            .chain(self.momentum_grid.multi_index(k_index))
            .collect()
    }

    /// Flattens the composite `(iω, k)` index into the diagonal of a dense matrix
    ///
    /// The frequency index is the slow one, so row `iw * knorm + k` holds `f(iω, k)`.
    pub fn as_diagonal_matrix(&self) -> DMatrix<Complex64> {
        let diagonal = DVector::from_iterator(self.data.len(), self.data.iter().copied());
        DMatrix::from_diagonal(&diagonal)
    }

    /// The `n_frequency x n_frequency` diagonal matrix of the field at one momentum point
    pub fn frequency_diagonal_at(&self, k_index: usize) -> DMatrix<Complex64> {
        let diagonal = DVector::from_iterator(
            self.frequency_grid.len(),
            (0..self.frequency_grid.len()).map(|iw| self.get(iw, k_index)),
        );
        DMatrix::from_diagonal(&diagonal)
    }

    /// Largest absolute element-wise difference between two fields on the same grids
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        assert_eq!(self.data.shape(), other.data.shape());
        self.data
            .iter()
            .zip(other.data.iter())
            .fold(0., |max, (a, b)| f64::max(max, (a - b).norm()))
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(Complex64::is_zero)
    }
}

impl<S: Statistics, const D: usize> std::ops::Div<f64> for GridField<S, D> {
    type Output = Self;
    fn div(mut self, rhs: f64) -> Self {
        self.data.mapv_inplace(|x| x / rhs);
        self
    }
}

impl<S: Statistics, const D: usize> std::ops::Mul<Complex64> for GridField<S, D> {
    type Output = Self;
    fn mul(mut self, rhs: Complex64) -> Self {
        self.data.mapv_inplace(|x| x * rhs);
        self
    }
}
