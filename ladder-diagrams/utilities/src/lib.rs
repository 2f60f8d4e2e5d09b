// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

pub mod structures;

use nalgebra::DMatrix;
use num_complex::Complex64;
use rand::{thread_rng, Rng};

/// Complex number with real and imaginary parts drawn uniformly from `(-1, 1)`
pub fn random_complex<R: Rng>(rng: &mut R) -> Complex64 {
    Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
}

/// Dense square matrix whose entries all have modulus below `scale`
pub fn random_complex_matrix(dimension: usize, scale: f64) -> DMatrix<Complex64> {
    let mut rng = thread_rng();
    DMatrix::from_fn(dimension, dimension, |_, _| {
        random_complex(&mut rng) * (scale / 2f64.sqrt())
    })
}

/// A bubble and vertex whose product has Frobenius norm below `bound`
///
/// For `bound < 1` the ladder built from the pair converges under iteration.
pub fn contracting_pair(dimension: usize, bound: f64) -> (DMatrix<Complex64>, DMatrix<Complex64>) {
    let bubble = random_complex_matrix(dimension, bound / (dimension * dimension) as f64);
    let vertex = random_complex_matrix(dimension, 1.);
    (bubble, vertex)
}
