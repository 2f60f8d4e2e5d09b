// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Bubbles
//!
//! The pair propagator
//!
//! ```text
//! χ₀(iω, k; W) = -T/N Σ_k' G(iω, k') G(iω + W, k - k')
//! ```
//!
//! evaluated for every fermionic frequency on the grid of `G` at one bosonic transfer frequency
//! `W`. The momentum convolution is carried out as a product in real space: each frequency slice
//! is transformed forward, multiplied point-wise and transformed back.

use ladder_mesher::{BosonicPoint, GkField, MomentumField, MomentumTransform};
use num_complex::Complex64;
use rayon::prelude::*;

/// The bubble at zero transfer frequency, `-T/N Σ_k' G(iω, k') G(iω, k - k')`
#[tracing::instrument(name = "Static bubble", level = "debug", skip_all, fields(knorm = gf.knorm()))]
pub fn calc_static_bubbles<const D: usize>(gf: &GkField<D>) -> GkField<D> {
    convolve(gf, None)
}

/// The bubble at transfer frequency `w`, `-T/N Σ_k' G(iω, k') G(iω + W, k - k')`
///
/// Frequencies `iω + W` which fall off the fermionic grid contribute zero.
#[tracing::instrument(name = "Bubble", level = "debug", skip_all, fields(W = w.n()))]
pub fn calc_bubbles<const D: usize>(gf: &GkField<D>, w: &BosonicPoint) -> GkField<D> {
    if w.n() == 0 {
        tracing::debug!("Zero transfer frequency, evaluating the static bubble");
        return calc_static_bubbles(gf);
    }
    let shifted = shift_frequency(gf, w);
    convolve(gf, Some(&shifted))
}

/// Copy of `gf` with every fermionic frequency moved up by `w`, `G(iω + W, k)`
///
/// The shift is exact integer arithmetic on the Matsubara numbers. Where `iω + W` is not on the
/// grid the copy holds zero: the boundary is open, there is no wrap-around or extrapolation.
pub fn shift_frequency<const D: usize>(gf: &GkField<D>, w: &BosonicPoint) -> GkField<D> {
    let (fgrid, kgrid) = gf.grids();
    let mut shifted = GkField::zeros(fgrid.clone(), kgrid.clone());
    for point in fgrid.points() {
        if let Some(source) = fgrid.position_of(point.n() + w.n()) {
            shifted.slice_mut(point.index()).assign(&gf.slice(source));
        }
    }
    shifted
}

/// Convolves `gf` with `partner`, or with itself when no partner is given
fn convolve<const D: usize>(gf: &GkField<D>, partner: Option<&GkField<D>>) -> GkField<D> {
    let (fgrid, kgrid) = gf.grids();
    let transform = MomentumTransform::for_grid(kgrid);
    let knorm = gf.knorm() as f64;

    let slices: Vec<MomentumField> = (0..fgrid.len())
        .into_par_iter()
        .map(|iw| {
            let g1 = transform.forward(gf.slice(iw));
            let product = match partner {
                Some(partner) => &g1 * &transform.forward(partner.slice(iw)),
                None => g1.mapv(|x| x * x),
            };
            // The transform pair is unnormalised
            transform.backward(product.view()) / knorm
        })
        .collect();

    let mut out = GkField::zeros(fgrid.clone(), kgrid.clone());
    for (iw, slice) in slices.into_iter().enumerate() {
        out.slice_mut(iw).assign(&slice);
    }
    // Average over the Brillouin zone and multiply by -T
    out * Complex64::new(-1. / (knorm * fgrid.beta()), 0.)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lattice::{greens_function, HypercubicLattice};
    use approx::assert_relative_eq;
    use ladder_mesher::{BosonicGrid, FermionicGrid, KMesh, MomentumGrid};
    use proptest::prelude::*;
    use utilities::structures::random_greens_function;

    /// Direct evaluation of `-T/N Σ_k' G(iω, k') G(iω + W, k - k')` on a one-dimensional mesh
    fn brute_force_bubble(gf: &GkField<1>, shifted: &GkField<1>) -> GkField<1> {
        let (fgrid, kgrid) = gf.grids();
        let n = gf.knorm();
        let beta = fgrid.beta();
        let mut out = GkField::zeros(fgrid.clone(), kgrid.clone());
        for iw in 0..fgrid.len() {
            for k in 0..n {
                let sum = (0..n).fold(Complex64::new(0., 0.), |sum, k1| {
                    sum + gf.get(iw, k1) * shifted.get(iw, (k + n - k1) % n)
                });
                out.set(iw, k, -sum / (beta * n as f64));
            }
        }
        out
    }

    #[test]
    fn zero_transfer_frequency_reproduces_the_static_bubble_exactly() {
        let fgrid = FermionicGrid::symmetric(5., 4).unwrap();
        let bgrid = BosonicGrid::symmetric(5., 3).unwrap();
        let gf = random_greens_function(fgrid, MomentumGrid::<2>::uniform(4).unwrap());
        let w = bgrid.point_with_n(0).unwrap();
        assert_eq!(calc_bubbles(&gf, &w), calc_static_bubbles(&gf));
    }

    #[test]
    fn momentum_independent_greens_function_gives_minus_c_squared_t() {
        let beta = 3.;
        let fgrid = FermionicGrid::symmetric(beta, 5).unwrap();
        let kgrid = MomentumGrid::<2>::uniform(6).unwrap();
        // Zero hopping leaves G(iω, k) = 1 / (iω + μ) at every k
        let lattice = HypercubicLattice::<2>::new(0.);
        let gf = greens_function(&lattice, fgrid.clone(), kgrid, 0.4);
        let bubbles = calc_static_bubbles(&gf);
        for w in fgrid.points() {
            let c = gf.get(w.index(), 0);
            let expected = -c * c / beta;
            for k in 0..bubbles.knorm() {
                let value = bubbles.get(w.index(), k);
                assert_relative_eq!(value.re, expected.re, epsilon = 1e-12);
                assert_relative_eq!(value.im, expected.im, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn static_bubble_matches_a_direct_momentum_sum() {
        let fgrid = FermionicGrid::symmetric(2., 3).unwrap();
        let gf = random_greens_function(fgrid, MomentumGrid::new([KMesh::new(7).unwrap()]));
        let expected = brute_force_bubble(&gf, &gf);
        assert!(calc_static_bubbles(&gf).max_abs_diff(&expected) < 1e-12);
    }

    #[test]
    fn finite_frequency_bubble_matches_a_direct_momentum_sum() {
        let fgrid = FermionicGrid::symmetric(2., 4).unwrap();
        let bgrid = BosonicGrid::symmetric(2., 3).unwrap();
        let gf = random_greens_function(fgrid, MomentumGrid::new([KMesh::new(5).unwrap()]));
        for w in bgrid.points() {
            let shifted = shift_frequency(&gf, &w);
            let expected = brute_force_bubble(&gf, &shifted);
            assert!(calc_bubbles(&gf, &w).max_abs_diff(&expected) < 1e-12);
        }
    }

    #[test]
    fn shift_moves_slices_and_zeroes_the_open_boundary() {
        let fgrid = FermionicGrid::new(1., -3, 3).unwrap();
        let bgrid = BosonicGrid::symmetric(1., 3).unwrap();
        let gf = random_greens_function(fgrid.clone(), MomentumGrid::<1>::uniform(4).unwrap());
        let w = bgrid.point_with_n(2).unwrap();
        let shifted = shift_frequency(&gf, &w);
        for point in fgrid.points() {
            match fgrid.position_of(point.n() + 2) {
                Some(source) => assert_eq!(shifted.slice(point.index()), gf.slice(source)),
                None => assert!(shifted.slice(point.index()).iter().all(|x| x.norm() == 0.)),
            }
        }
        // n = 1 and n = 2 have no partner on [-3, 3)
        assert!(shifted.slice(4).iter().all(|x| x.norm() == 0.));
        assert!(shifted.slice(5).iter().all(|x| x.norm() == 0.));
    }

    #[test]
    fn shift_beyond_the_grid_leaves_nothing() {
        let fgrid = FermionicGrid::symmetric(1., 2).unwrap();
        let bgrid = BosonicGrid::symmetric(1., 6).unwrap();
        let gf = random_greens_function(fgrid, MomentumGrid::<2>::uniform(3).unwrap());
        for n in [-5, -4, 4, 5] {
            let w = bgrid.point_with_n(n).unwrap();
            assert!(shift_frequency(&gf, &w).is_zero());
            assert!(calc_bubbles(&gf, &w).max_abs_diff(&GkField::zeros(
                gf.frequency_grid().clone(),
                gf.momentum_grid().clone()
            )) < 1e-15);
        }
    }

    #[test]
    fn local_bubble_is_the_product_of_local_greens_functions() {
        let beta = 4.;
        let fgrid = FermionicGrid::symmetric(beta, 3).unwrap();
        let bgrid = BosonicGrid::symmetric(beta, 2).unwrap();
        let gf = random_greens_function(fgrid.clone(), MomentumGrid::<0>::new([]));
        let w = bgrid.point_with_n(1).unwrap();
        let bubbles = calc_bubbles(&gf, &w);
        for point in fgrid.points() {
            let expected = match fgrid.position_of(point.n() + 1) {
                Some(source) => -gf.get(point.index(), 0) * gf.get(source, 0) / beta,
                None => Complex64::new(0., 0.),
            };
            let value = bubbles.get(point.index(), 0);
            assert_relative_eq!(value.re, expected.re, epsilon = 1e-14);
            assert_relative_eq!(value.im, expected.im, epsilon = 1e-14);
        }
    }

    proptest! {
        #[test]
        fn general_and_static_bubbles_agree_at_zero_transfer(
            beta in 0.5_f64..50.,
            n_freq in 1_usize..4,
            n_k in 1_usize..6,
        ) {
            let fgrid = FermionicGrid::symmetric(beta, n_freq).unwrap();
            let bgrid = BosonicGrid::symmetric(beta, 1).unwrap();
            let gf = random_greens_function(fgrid, MomentumGrid::<2>::uniform(n_k).unwrap());
            let w = bgrid.point(0);
            prop_assert_eq!(calc_bubbles(&gf, &w), calc_static_bubbles(&gf));
        }
    }
}
