// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Lattice
//!
//! The single-particle dispersion is the only property of the lattice the diagrammatic
//! routines consume. It enters through the non-interacting Green's function.

use ladder_mesher::{FermionicGrid, GkField, MomentumGrid};
use num_complex::Complex64;
use serde::Deserialize;

/// A band dispersion `ε(k)` on a `D`-dimensional Brillouin zone
pub trait Dispersion<const D: usize>: Send + Sync {
    fn energy(&self, k: &[f64; D]) -> f64;
}

/// Nearest-neighbour tight binding on a hypercubic lattice, `ε(k) = -2t Σ_i cos k_i`
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct HypercubicLattice<const D: usize> {
    hopping: f64,
}

impl<const D: usize> HypercubicLattice<D> {
    pub fn new(hopping: f64) -> Self {
        Self { hopping }
    }

    pub fn hopping(&self) -> f64 {
        self.hopping
    }
}

impl<const D: usize> Dispersion<D> for HypercubicLattice<D> {
    fn energy(&self, k: &[f64; D]) -> f64 {
        -2. * self.hopping * k.iter().map(|k| k.cos()).sum::<f64>()
    }
}

/// The non-interacting lattice Green's function `G(iω, k) = 1 / (iω + μ - ε(k))`
pub fn greens_function<L, const D: usize>(
    lattice: &L,
    fgrid: FermionicGrid,
    kgrid: MomentumGrid<D>,
    chemical_potential: f64,
) -> GkField<D>
where
    L: Dispersion<D>,
{
    GkField::from_fn(fgrid, kgrid, |w, k| {
        (w.value() + chemical_potential - lattice.energy(&k)).inv()
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn square_lattice_band_edges() {
        let lattice = HypercubicLattice::<2>::new(1.);
        assert_relative_eq!(lattice.energy(&[0., 0.]), -4.);
        assert_relative_eq!(lattice.energy(&[PI, PI]), 4.);
        assert_relative_eq!(lattice.energy(&[PI / 2., PI / 2.]), 0., epsilon = 1e-12);
    }

    #[test]
    fn greens_function_inverts_the_dyson_denominator() {
        let lattice = HypercubicLattice::<1>::new(0.5);
        let fgrid = FermionicGrid::symmetric(10., 3).unwrap();
        let kgrid = MomentumGrid::<1>::uniform(8).unwrap();
        let mu = 0.2;
        let gf = greens_function(&lattice, fgrid.clone(), kgrid.clone(), mu);
        for w in fgrid.points() {
            for (index, k) in kgrid.points().enumerate() {
                let denominator = w.value() + mu - lattice.energy(&k);
                let product = gf.get(w.index(), index) * denominator;
                assert_relative_eq!(product.re, 1., epsilon = 1e-12);
                assert_relative_eq!(product.im, 0., epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn particle_hole_symmetry_at_half_filling() {
        // G(-iω, k + π) = -G(iω, k) when μ = 0
        let lattice = HypercubicLattice::<1>::new(1.);
        let fgrid = FermionicGrid::symmetric(5., 2).unwrap();
        let kgrid = MomentumGrid::<1>::uniform(4).unwrap();
        let gf = greens_function(&lattice, fgrid.clone(), kgrid, 0.);
        for w in fgrid.points() {
            let mirrored = fgrid.position_of(-w.n() - 1).unwrap();
            for k in 0..4 {
                let value = gf.get(w.index(), k) + gf.get(mirrored, (k + 2) % 4);
                assert_relative_eq!(value.norm(), 0., epsilon = 1e-12);
            }
        }
    }
}
