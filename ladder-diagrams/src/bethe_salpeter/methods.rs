// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::{BetheSalpeter, BetheSalpeterError, ConvolutionOrder, SolveSettings};
use nalgebra::{ComplexField, DMatrix, RealField};
use num_complex::Complex;

impl<'a, T: RealField + Copy, Direction: ConvolutionOrder> BetheSalpeter<'a, T, Direction> {
    /// Solves the ladder by direct inversion, `χ = (1 - K)⁻¹ χ₀`
    ///
    /// Records `det(1 - K)`, which remains available through `determinant` after the call.
    #[tracing::instrument(name = "BSE inversion", level = "debug", skip_all, fields(dim = self.dimension()))]
    pub fn solve_inversion(
        &mut self,
    ) -> Result<DMatrix<Complex<T>>, BetheSalpeterError<T>> {
        let dimension = self.dimension();
        let system = DMatrix::<Complex<T>>::identity(dimension, dimension) - self.kernel();
        let decomposition = system.lu();
        self.determinant = decomposition.determinant();

        let modulus = self.determinant.modulus();
        let threshold: T = nalgebra::convert(1e-10);
        if modulus < threshold {
            tracing::warn!(
                "The Bethe-Salpeter determinant is close to zero: |det| = {}",
                modulus
            );
        }
        decomposition
            .solve(self.bubble)
            .ok_or(BetheSalpeterError::SingularKernel {
                determinant: self.determinant,
            })
    }

    /// Solves the ladder by fixed point iteration of `χ ← χ₀ + Kχ`, starting from `χ₀`
    ///
    /// Each new iterate is blended with the previous one as `mix χ_new + (1 - mix) χ_old`. No
    /// convergence check is carried out, exactly `n_iter` steps are taken. When `only_order_n`
    /// is set the `n_iter`th term of the series, `Kⁿχ₀`, is returned instead of the partial sum
    /// and `mix` plays no role.
    #[tracing::instrument(name = "BSE iteration", level = "debug", skip_all, fields(n_iter = n_iter))]
    pub fn solve_iterations(&self, n_iter: usize, mix: T, only_order_n: bool) -> DMatrix<Complex<T>> {
        let kernel = self.kernel();
        let mix = Complex::from(mix);
        let retain = Complex::from(T::one()) - mix;

        let mut chi = self.bubble.clone();
        for iteration in 0..n_iter {
            let next = if only_order_n {
                &kernel * &chi
            } else {
                let update = self.bubble + &kernel * &chi;
                update * mix + &chi * retain
            };
            if self.verbosity > 0 {
                tracing::debug!(
                    "Iteration {}: |Δχ| = {}",
                    iteration + 1,
                    (&next - &chi).norm()
                );
            }
            chi = next;
        }
        chi
    }

    /// Dispatches to `solve_iterations` or `solve_inversion`
    pub fn solve(
        &mut self,
        eval_iterations: bool,
        n_iter: usize,
        mix: T,
        only_order_n: bool,
    ) -> Result<DMatrix<Complex<T>>, BetheSalpeterError<T>> {
        if eval_iterations {
            Ok(self.solve_iterations(n_iter, mix, only_order_n))
        } else {
            self.solve_inversion()
        }
    }

    pub fn solve_with(
        &mut self,
        settings: &SolveSettings<T>,
    ) -> Result<DMatrix<Complex<T>>, BetheSalpeterError<T>> {
        self.solve(
            settings.eval_iterations,
            settings.n_iter,
            settings.mix,
            settings.only_order_n,
        )
    }
}

#[cfg(test)]
mod test {
    use super::super::{Backward, BetheSalpeterBuilder, Forward};
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;
    use proptest::prelude::*;
    use utilities::{contracting_pair, random_complex_matrix};

    fn scalar(value: f64) -> DMatrix<Complex64> {
        DMatrix::from_element(1, 1, Complex64::from(value))
    }

    #[test]
    fn scalar_ladder_sums_the_geometric_series() {
        let bubble = scalar(0.5);
        let vertex = scalar(1.0);
        let mut solver = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&vertex)
            .build::<Forward>()
            .unwrap();
        let chi = solver.solve_inversion().unwrap();
        assert_relative_eq!(chi[(0, 0)].re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(chi[(0, 0)].im, 0.0, epsilon = 1e-12);
        assert_relative_eq!(solver.determinant().re, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn vanishing_vertex_returns_the_bubble() {
        let bubble = random_complex_matrix(6, 1.0);
        let vertex = DMatrix::<Complex64>::zeros(6, 6);
        let mut solver = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&vertex)
            .build::<Forward>()
            .unwrap();
        let chi = solver.solve_inversion().unwrap();
        assert_relative_eq!((&chi - &bubble).norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(solver.determinant().re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(solver.determinant().im, 0.0, epsilon = 1e-12);
        let iterated = solver.solve_iterations(5, 1.0, false);
        assert_relative_eq!((&iterated - &bubble).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn iteration_converges_monotonically_to_the_inversion() {
        let (bubble, vertex) = contracting_pair(4, 0.5);
        let mut solver = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&vertex)
            .build::<Forward>()
            .unwrap();
        let exact = solver.solve_inversion().unwrap();

        let mut previous = f64::INFINITY;
        for n_iter in 1..8 {
            let error = (solver.solve_iterations(n_iter, 1.0, false) - &exact).norm();
            // Below the accuracy of the inversion the sequence stalls
            assert!(error < previous || error < 1e-14);
            previous = error;
        }
        let error = (solver.solve_iterations(64, 1.0, false) - &exact).norm();
        assert!(error < 1e-10);
    }

    #[test]
    fn mixing_slows_but_does_not_shift_the_fixed_point() {
        let (bubble, vertex) = contracting_pair(4, 0.5);
        let mut solver = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&vertex)
            .build::<Forward>()
            .unwrap();
        let exact = solver.solve_inversion().unwrap();
        let mixed = solver.solve_iterations(200, 0.5, false);
        assert_relative_eq!((mixed - exact).norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn backward_ladder_solves_the_transposed_order() {
        let bubble = random_complex_matrix(4, 0.3);
        let vertex = random_complex_matrix(4, 0.3);
        let mut solver = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&vertex)
            .build::<Backward>()
            .unwrap();
        let chi = solver.solve_inversion().unwrap();
        // χ = χ₀ + Γχ₀χ
        let residual = &chi - &bubble - &vertex * &bubble * &chi;
        assert_relative_eq!(residual.norm(), 0.0, epsilon = 1e-10);

        let mut forward = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&vertex)
            .build::<Forward>()
            .unwrap();
        let chi = forward.solve_inversion().unwrap();
        let residual = &chi - &bubble - &bubble * &vertex * &chi;
        assert_relative_eq!(residual.norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn order_n_term_is_a_power_of_the_kernel() {
        let bubble = random_complex_matrix(3, 0.5);
        let vertex = random_complex_matrix(3, 0.5);
        let solver = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&vertex)
            .build::<Forward>()
            .unwrap();
        let kernel = &bubble * &vertex;
        let expected = &kernel * &kernel * &kernel * &bubble;
        let term = solver.solve_iterations(3, 0.3, true);
        assert_relative_eq!((term - expected).norm(), 0.0, epsilon = 1e-12);
        assert_eq!(solver.solve_iterations(0, 1.0, true), bubble);
    }

    #[test]
    fn singular_kernel_is_reported() {
        let bubble = scalar(1.0);
        let vertex = scalar(1.0);
        let mut solver = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&vertex)
            .build::<Forward>()
            .unwrap();
        let result = solver.solve_inversion();
        assert!(matches!(
            result,
            Err(BetheSalpeterError::SingularKernel { .. })
        ));
        assert_eq!(solver.determinant(), Complex64::new(0., 0.));
    }

    #[test]
    fn dispatch_follows_the_settings() {
        let bubble = scalar(0.5);
        let vertex = scalar(1.0);
        let mut solver = BetheSalpeterBuilder::new()
            .with_bubble(&bubble)
            .with_vertex(&vertex)
            .build::<Forward>()
            .unwrap();
        let settings = SolveSettings {
            eval_iterations: true,
            n_iter: 2,
            mix: 1.0,
            only_order_n: false,
        };
        // 0.5 + 0.25 + 0.125
        let chi = solver.solve_with(&settings).unwrap();
        assert_relative_eq!(chi[(0, 0)].re, 0.875, epsilon = 1e-12);
        assert_eq!(solver.determinant(), Complex64::new(1., 0.));

        let chi = solver.solve(false, 0, 1.0, false).unwrap();
        assert_relative_eq!(chi[(0, 0)].re, 1.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn inversion_is_idempotent(dimension in 1_usize..8, scale in 0.01_f64..1.) {
            let bubble = random_complex_matrix(dimension, scale);
            let vertex = random_complex_matrix(dimension, scale);
            let mut solver = BetheSalpeterBuilder::new()
                .with_bubble(&bubble)
                .with_vertex(&vertex)
                .build::<Forward>()
                .unwrap();
            let first = solver.solve_inversion();
            let determinant = solver.determinant();
            let second = solver.solve_inversion();
            prop_assert_eq!(first.ok(), second.ok());
            prop_assert_eq!(determinant, solver.determinant());
        }
    }
}
