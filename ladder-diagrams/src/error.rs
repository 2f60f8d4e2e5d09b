// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! Error types shared by the diagrammatic routines

use ladder_mesher::GridError;
use miette::Diagnostic;
use nalgebra::{DMatrix, Scalar};

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Invalid inputs detected while assembling a calculation
pub enum BuildError {
    #[error("The bubble is {bubble:?} but the vertex is {vertex:?}, they must have equal dimension")]
    #[diagnostic(code(ladder::dimension_mismatch))]
    DimensionMismatch {
        bubble: (usize, usize),
        vertex: (usize, usize),
    },
    #[error("Expected a square matrix, found {rows}x{columns}")]
    NonSquare { rows: usize, columns: usize },
    #[error("Cannot solve with empty matrices")]
    Empty,
    #[error("{0}")]
    GridMismatch(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Failures in the eigenvalue analysis of the Bethe-Salpeter kernel
pub enum EigenError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("The eigen-decomposition of a {0}x{0} kernel failed to converge")]
    NoConvergence(usize),
}

impl From<GridError> for EigenError {
    fn from(error: GridError) -> Self {
        Self::Build(BuildError::from(error))
    }
}

/// Checks the bubble and vertex are square matrices of the same, non-zero, dimension
pub(crate) fn check_dimensions<T: Scalar>(
    bubble: &DMatrix<T>,
    vertex: &DMatrix<T>,
) -> Result<usize, BuildError> {
    for matrix in [bubble, vertex] {
        if !matrix.is_square() {
            return Err(BuildError::NonSquare {
                rows: matrix.nrows(),
                columns: matrix.ncols(),
            });
        }
    }
    if bubble.shape() != vertex.shape() {
        return Err(BuildError::DimensionMismatch {
            bubble: bubble.shape(),
            vertex: vertex.shape(),
        });
    }
    if bubble.is_empty() {
        return Err(BuildError::Empty);
    }
    Ok(bubble.nrows())
}
