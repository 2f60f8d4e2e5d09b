// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! Errors raised while constructing grids and the fields defined on them

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Failures in grid construction and grid-indexed access
pub enum GridError {
    #[error("The inverse temperature must be positive, found {0}")]
    NonPositiveBeta(f64),
    #[error("The Matsubara range [{min_n}, {max_n}) holds no points")]
    EmptyRange { min_n: i64, max_n: i64 },
    #[error("A momentum axis needs at least one point")]
    EmptyMomentumAxis,
    #[error("Field data of shape {found:?} cannot be placed on grids of shape {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    #[error("Matsubara index {n} lies outside the grid [{min_n}, {max_n})")]
    OutOfRange { n: i64, min_n: i64, max_n: i64 },
}
