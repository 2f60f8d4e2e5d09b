// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Vertices
//!
//! Two-particle vertices `Γ(W, iω, iω')` over one bosonic and two fermionic frequencies.
//! At a fixed transfer frequency the vertex is a dense matrix over the fermionic pair.

use crate::{BosonicGrid, BosonicPoint, FermionicGrid, FermionicPoint, GridError};
use nalgebra::DMatrix;
use ndarray::{Array3, Axis};
use num_complex::Complex64;

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    bosonic_grid: BosonicGrid,
    fermionic_grid: FermionicGrid,
    data: Array3<Complex64>,
}

impl Vertex {
    pub fn zeros(bosonic_grid: BosonicGrid, fermionic_grid: FermionicGrid) -> Self {
        Self::constant(bosonic_grid, fermionic_grid, Complex64::new(0., 0.))
    }

    /// A frequency-independent vertex, for example a bare Hubbard interaction
    pub fn constant(
        bosonic_grid: BosonicGrid,
        fermionic_grid: FermionicGrid,
        value: Complex64,
    ) -> Self {
        let shape = (bosonic_grid.len(), fermionic_grid.len(), fermionic_grid.len());
        Self {
            bosonic_grid,
            fermionic_grid,
            data: Array3::from_elem(shape, value),
        }
    }

    pub fn from_fn<F>(bosonic_grid: BosonicGrid, fermionic_grid: FermionicGrid, f: F) -> Self
    where
        F: Fn(BosonicPoint, FermionicPoint, FermionicPoint) -> Complex64,
    {
        let shape = (bosonic_grid.len(), fermionic_grid.len(), fermionic_grid.len());
        let data = Array3::from_shape_fn(shape, |(iw_b, iw_1, iw_2)| {
            f(
                bosonic_grid.point(iw_b),
                fermionic_grid.point(iw_1),
                fermionic_grid.point(iw_2),
            )
        });
        Self {
            bosonic_grid,
            fermionic_grid,
            data,
        }
    }

    pub fn grids(&self) -> (&BosonicGrid, &FermionicGrid, &FermionicGrid) {
        (&self.bosonic_grid, &self.fermionic_grid, &self.fermionic_grid)
    }

    pub fn bosonic_grid(&self) -> &BosonicGrid {
        &self.bosonic_grid
    }

    pub fn fermionic_grid(&self) -> &FermionicGrid {
        &self.fermionic_grid
    }

    pub fn get(&self, bosonic_index: usize, left: usize, right: usize) -> Complex64 {
        self.data[[bosonic_index, left, right]]
    }

    pub fn set(&mut self, bosonic_index: usize, left: usize, right: usize, value: Complex64) {
        self.data[[bosonic_index, left, right]] = value;
    }

    /// Materialises the dense fermionic matrix `Γ(W)[iω, iω']`
    ///
    /// The point is located by its Matsubara number, so points taken from another grid with
    /// the same temperature are valid as long as the frequency is present on this one.
    pub fn as_matrix(&self, w: &BosonicPoint) -> Result<DMatrix<Complex64>, GridError> {
        let index = self.bosonic_grid.point_with_n(w.n())?.index();
        let slice = self.data.index_axis(Axis(0), index);
        let n = self.fermionic_grid.len();
        Ok(DMatrix::from_fn(n, n, |row, column| slice[[row, column]]))
    }
}
