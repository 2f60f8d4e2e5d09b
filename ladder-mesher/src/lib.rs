// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Ladder Mesher
//!
//! Grids and grid-indexed containers for finite-temperature lattice diagrammatics.
//!
//! A calculation lives on the product of a Matsubara frequency grid, fermionic or bosonic,
//! and a `D`-dimensional periodic momentum mesh. Fields defined on these grids are stored
//! as dense `ndarray` arrays whose shape is fixed when the field is created, and the
//! momentum axes can be carried to real space and back with [`MomentumTransform`].

mod error;
mod fft;
mod field;
mod matsubara;
mod momentum;
mod vertex;

pub use error::*;
pub use fft::*;
pub use field::*;
pub use matsubara::*;
pub use momentum::*;
pub use vertex::*;
