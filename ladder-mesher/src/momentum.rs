// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Momentum Meshes
//!
//! Periodic Brillouin-zone meshes. A `MomentumGrid<D>` is the product of `D` one-dimensional
//! `KMesh` axes; its points are stored in row-major order so the last axis varies fastest.

use crate::GridError;
use std::f64::consts::PI;

/// A uniform periodic mesh `k_j = 2πj / n` for `j = 0..n`
#[derive(Clone, Debug, PartialEq)]
pub struct KMesh {
    points: Vec<f64>,
}

impl KMesh {
    pub fn new(number_of_points: usize) -> Result<Self, GridError> {
        if number_of_points == 0 {
            return Err(GridError::EmptyMomentumAxis);
        }
        let spacing = 2. * PI / number_of_points as f64;
        Ok(Self {
            points: (0..number_of_points).map(|j| j as f64 * spacing).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn point(&self, index: usize) -> f64 {
        self.points[index]
    }
}

/// The `D`-fold product of periodic momentum axes
///
/// `D = 0` is a valid, single-point grid describing a momentum-independent quantity.
#[derive(Clone, Debug, PartialEq)]
pub struct MomentumGrid<const D: usize> {
    axes: [KMesh; D],
}

impl<const D: usize> MomentumGrid<D> {
    pub fn new(axes: [KMesh; D]) -> Self {
        Self { axes }
    }

    /// A hypercubic grid with the same number of points along every axis
    pub fn uniform(points_per_axis: usize) -> Result<Self, GridError> {
        let mesh = KMesh::new(points_per_axis)?;
        Ok(Self {
            axes: std::array::from_fn(|_| mesh.clone()),
        })
    }

    pub fn axes(&self) -> &[KMesh; D] {
        &self.axes
    }

    pub fn shape(&self) -> [usize; D] {
        std::array::from_fn(|axis| self.axes[axis].len())
    }

    /// Total number of momentum points
    pub fn len(&self) -> usize {
        self.axes.iter().map(KMesh::len).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts a flat row-major index to one index per axis
    pub fn multi_index(&self, flat_index: usize) -> [usize; D] {
        let mut remainder = flat_index;
        let mut multi = [0; D];
        for axis in (0..D).rev() {
            let n = self.axes[axis].len();
            multi[axis] = remainder % n;
            remainder /= n;
        }
        multi
    }

    pub fn flat_index(&self, multi_index: &[usize; D]) -> usize {
        multi_index
            .iter()
            .zip(self.axes.iter())
            .fold(0, |flat, (&index, axis)| flat * axis.len() + index)
    }

    pub fn point(&self, flat_index: usize) -> [f64; D] {
        let multi = self.multi_index(flat_index);
        std::array::from_fn(|axis| self.axes[axis].point(multi[axis]))
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; D]> + '_ {
        (0..self.len()).map(|flat_index| self.point(flat_index))
    }
}
