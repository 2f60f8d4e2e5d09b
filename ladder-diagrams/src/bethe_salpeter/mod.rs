// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Bethe-Salpeter Equation
//!
//! Solves the ladder equation for the susceptibility given the bubble `χ₀` and an irreducible
//! vertex `Γ`, both as dense matrices over the same composite index:
//!
//! ```text
//! forward:  χ = χ₀ + χ₀ Γ χ   =>  χ = (1 - χ₀Γ)⁻¹ χ₀
//! backward: χ = χ₀ + Γ χ₀ χ   =>  χ = (1 - Γχ₀)⁻¹ χ₀
//! ```
//!
//! The two orders coincide when `χ₀` and `Γ` commute. Which one is solved is fixed at compile
//! time through the `Forward` and `Backward` markers.

mod methods;
mod settings;

pub use settings::SolveSettings;

use crate::error::{check_dimensions, BuildError};
use miette::Diagnostic;
use nalgebra::{DMatrix, RealField};
use num_complex::Complex;
use std::marker::PhantomData;

/// Order in which the bubble and vertex are chained in the kernel `K` of `χ = χ₀ + Kχ`
pub trait ConvolutionOrder: Send + Sync {
    const FORWARD: bool;
    fn kernel<T: RealField + Copy>(
        bubble: &DMatrix<Complex<T>>,
        vertex: &DMatrix<Complex<T>>,
    ) -> DMatrix<Complex<T>>;
}

/// `K = χ₀Γ`
#[derive(Clone, Copy, Debug)]
pub struct Forward;

/// `K = Γχ₀`
#[derive(Clone, Copy, Debug)]
pub struct Backward;

impl ConvolutionOrder for Forward {
    const FORWARD: bool = true;
    fn kernel<T: RealField + Copy>(
        bubble: &DMatrix<Complex<T>>,
        vertex: &DMatrix<Complex<T>>,
    ) -> DMatrix<Complex<T>> {
        bubble * vertex
    }
}

impl ConvolutionOrder for Backward {
    const FORWARD: bool = false;
    fn kernel<T: RealField + Copy>(
        bubble: &DMatrix<Complex<T>>,
        vertex: &DMatrix<Complex<T>>,
    ) -> DMatrix<Complex<T>> {
        vertex * bubble
    }
}

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum BetheSalpeterError<T: RealField> {
    #[error("The Bethe-Salpeter kernel is singular, det(1 - K) = {determinant}")]
    #[diagnostic(help("The vertex is at an instability of the ladder"))]
    SingularKernel { determinant: Complex<T> },
}

/// A single Bethe-Salpeter solve over borrowed bubble and vertex matrices
///
/// The solver holds no state beyond the determinant recorded by `solve_inversion`. It is
/// cheap to build and intended to be discarded after one solve.
#[derive(Debug)]
pub struct BetheSalpeter<'a, T: RealField + Copy, Direction> {
    bubble: &'a DMatrix<Complex<T>>,
    vertex: &'a DMatrix<Complex<T>>,
    determinant: Complex<T>,
    verbosity: u32,
    marker: PhantomData<Direction>,
}

/// Builder for `BetheSalpeter`, checks the dimensions of the two matrices agree
pub struct BetheSalpeterBuilder<RefBubble, RefVertex> {
    bubble: RefBubble,
    vertex: RefVertex,
    verbosity: u32,
}

impl BetheSalpeterBuilder<(), ()> {
    pub fn new() -> Self {
        Self {
            bubble: (),
            vertex: (),
            verbosity: 0,
        }
    }
}

impl<RefBubble, RefVertex> BetheSalpeterBuilder<RefBubble, RefVertex> {
    /// Attach the bubble `χ₀`
    pub fn with_bubble<Bubble>(self, bubble: &Bubble) -> BetheSalpeterBuilder<&Bubble, RefVertex> {
        BetheSalpeterBuilder {
            bubble,
            vertex: self.vertex,
            verbosity: self.verbosity,
        }
    }

    /// Attach the irreducible vertex `Γ`
    pub fn with_vertex<Vertex>(self, vertex: &Vertex) -> BetheSalpeterBuilder<RefBubble, &Vertex> {
        BetheSalpeterBuilder {
            bubble: self.bubble,
            vertex,
            verbosity: self.verbosity,
        }
    }

    /// Verbosity above zero reports per-iteration residuals
    pub fn with_verbosity(self, verbosity: u32) -> Self {
        Self { verbosity, ..self }
    }
}

impl<'a, T: RealField + Copy> BetheSalpeterBuilder<&'a DMatrix<Complex<T>>, &'a DMatrix<Complex<T>>> {
    /// Builds the solver for the chosen convolution order
    ///
    /// Fails if either matrix is not square or the two differ in dimension.
    pub fn build<Direction: ConvolutionOrder>(
        self,
    ) -> Result<BetheSalpeter<'a, T, Direction>, BuildError> {
        check_dimensions(self.bubble, self.vertex)?;
        Ok(BetheSalpeter {
            bubble: self.bubble,
            vertex: self.vertex,
            determinant: Complex::new(T::one(), T::zero()),
            verbosity: self.verbosity,
            marker: PhantomData,
        })
    }
}

impl<'a, T: RealField + Copy, Direction: ConvolutionOrder> BetheSalpeter<'a, T, Direction> {
    /// Whether the kernel is `χ₀Γ` (true) or `Γχ₀` (false)
    pub fn fwd(&self) -> bool {
        Direction::FORWARD
    }

    pub fn dimension(&self) -> usize {
        self.bubble.nrows()
    }

    pub fn verbosity(&self) -> u32 {
        self.verbosity
    }

    /// `det(1 - K)` from the last call to `solve_inversion`
    ///
    /// Holds the sentinel value `1` until an inversion has been carried out.
    pub fn determinant(&self) -> Complex<T> {
        self.determinant
    }

    /// The kernel `K` of `χ = χ₀ + Kχ`
    pub fn kernel(&self) -> DMatrix<Complex<T>> {
        Direction::kernel(self.bubble, self.vertex)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn forward_and_backward_kernels_chain_in_opposite_orders() {
        let bubble = DMatrix::from_row_slice(2, 2, &[1., 2., 3., 4.]).map(Complex64::from);
        let vertex = DMatrix::from_row_slice(2, 2, &[0., 1., 1., 0.]).map(Complex64::from);
        let forward = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&vertex)
            .build::<Forward>()
            .unwrap();
        let backward = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&vertex)
            .build::<Backward>()
            .unwrap();
        assert!(forward.fwd());
        assert!(!backward.fwd());
        assert_eq!(forward.kernel(), &bubble * &vertex);
        assert_eq!(backward.kernel(), &vertex * &bubble);
        assert_ne!(forward.kernel(), backward.kernel());
    }

    #[test]
    fn determinant_is_one_before_any_solve() {
        let bubble = DMatrix::<Complex64>::identity(3, 3);
        let solver = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&bubble)
            .with_verbosity(2)
            .build::<Forward>()
            .unwrap();
        assert_eq!(solver.determinant(), Complex64::new(1., 0.));
        assert_eq!(solver.verbosity(), 2);
    }

    #[test]
    fn mismatched_matrices_do_not_build() {
        let bubble = DMatrix::<Complex64>::identity(3, 3);
        let vertex = DMatrix::<Complex64>::identity(4, 4);
        let result = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&vertex)
            .build::<Backward>();
        assert!(matches!(result, Err(BuildError::DimensionMismatch { .. })));
    }
}
