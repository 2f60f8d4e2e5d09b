// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use nalgebra::RealField;
use serde::Deserialize;

/// Parameters selecting and steering a Bethe-Salpeter solve
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct SolveSettings<T> {
    /// Iterate the ladder rather than invert it
    pub eval_iterations: bool,
    pub n_iter: usize,
    /// Relaxation weight given to each new iterate
    pub mix: T,
    /// Return only the highest order term of the iterated series
    pub only_order_n: bool,
}

impl<T: RealField> Default for SolveSettings<T> {
    fn default() -> Self {
        Self {
            eval_iterations: false,
            n_iter: 1,
            mix: T::one(),
            only_order_n: false,
        }
    }
}
