// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use ladder_mesher::{BosonicGrid, FermionicGrid, GkField, MomentumGrid};
use rand::thread_rng;

/// Fermionic and bosonic grids at a common temperature with a uniform momentum grid
pub fn construct_grids<const D: usize>(
    beta: f64,
    fermionic_frequencies: usize,
    bosonic_frequencies: usize,
    momentum_points: usize,
) -> (FermionicGrid, BosonicGrid, MomentumGrid<D>) {
    (
        FermionicGrid::symmetric(beta, fermionic_frequencies).unwrap(),
        BosonicGrid::symmetric(beta, bosonic_frequencies).unwrap(),
        MomentumGrid::uniform(momentum_points).unwrap(),
    )
}

/// A field with no structure, every element drawn with `random_complex`
pub fn random_greens_function<const D: usize>(
    fermionic_grid: FermionicGrid,
    momentum_grid: MomentumGrid<D>,
) -> GkField<D> {
    let mut rng = thread_rng();
    GkField::from_fn(fermionic_grid, momentum_grid, |_, _| {
        crate::random_complex(&mut rng)
    })
}
