// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Momentum Transforms
//!
//! Joint multi-dimensional discrete Fourier transforms over the momentum axes of a field.
//! Neither direction is normalised: `backward(forward(x)) == N x` where `N` is the number of
//! momentum points. Callers divide by `N` themselves.

use crate::MomentumGrid;
use ndarray::{ArrayD, ArrayViewD, Axis};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

pub use rustfft::FftDirection;

/// Planned forward and backward transforms for one momentum shape
///
/// Plans are shared behind `Arc`, so a single `MomentumTransform` can be used from many
/// threads at once.
#[derive(Clone)]
pub struct MomentumTransform {
    shape: Vec<usize>,
    forward: Vec<Arc<dyn Fft<f64>>>,
    backward: Vec<Arc<dyn Fft<f64>>>,
}

impl std::fmt::Debug for MomentumTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MomentumTransform")
            .field("shape", &self.shape)
            .finish()
    }
}

impl MomentumTransform {
    pub fn new(shape: &[usize]) -> Self {
        let mut planner = FftPlanner::new();
        let forward = shape
            .iter()
            .map(|&n| planner.plan_fft(n, FftDirection::Forward))
            .collect();
        let backward = shape
            .iter()
            .map(|&n| planner.plan_fft(n, FftDirection::Inverse))
            .collect();
        Self {
            shape: shape.to_vec(),
            forward,
            backward,
        }
    }

    pub fn for_grid<const D: usize>(grid: &MomentumGrid<D>) -> Self {
        Self::new(&grid.shape())
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Momentum to position space, `Σ_k e^{-ikr} x(k)`
    pub fn forward(&self, input: ArrayViewD<Complex64>) -> ArrayD<Complex64> {
        self.process(input, FftDirection::Forward)
    }

    /// Position to momentum space, `Σ_r e^{ikr} x(r)`
    pub fn backward(&self, input: ArrayViewD<Complex64>) -> ArrayD<Complex64> {
        self.process(input, FftDirection::Inverse)
    }

    /// # Panics
    /// If the shape of `input` differs from the planned shape
    pub fn process(&self, input: ArrayViewD<Complex64>, direction: FftDirection) -> ArrayD<Complex64> {
        assert_eq!(
            input.shape(),
            self.shape.as_slice(),
            "The transform was planned for a different momentum shape"
        );
        let plans = match direction {
            FftDirection::Forward => &self.forward,
            FftDirection::Inverse => &self.backward,
        };
        let mut output = input.to_owned();
        let mut buffer = Vec::new();
        for (axis, plan) in plans.iter().enumerate() {
            for mut lane in output.lanes_mut(Axis(axis)) {
                buffer.clear();
                buffer.extend(lane.iter().copied());
                plan.process(&mut buffer);
                lane.iter_mut()
                    .zip(buffer.iter())
                    .for_each(|(element, &value)| *element = value);
            }
        }
        output
    }
}

/// Plans and applies a single transform
pub fn run_fft(input: ArrayViewD<Complex64>, direction: FftDirection) -> ArrayD<Complex64> {
    MomentumTransform::new(input.shape()).process(input, direction)
}
