// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Ladder computes two-particle ladder diagrams for lattice models on the Matsubara axis
//!
//! # Overview
//! Starting from a single-particle Green's function `G(iω, k)` Ladder builds the particle-hole
//! bubble `χ₀(iω, q; W)` by convolving `G` with itself over momentum, sums the ladder through the
//! Bethe-Salpeter equation `χ = χ₀ + χ₀Γχ` for a given irreducible vertex `Γ`, and extracts the
//! leading eigenvalue of the kernel `χ₀Γ`. An eigenvalue approaching one signals an instability
//! of the system, for example a magnetic or superconducting transition.
//!
//! # Usage
//! Ladder is distributed as a binary crate, and is intended to be run from the command line. A
//! calculation is described by a `.toml` file layered over the built-in defaults:
//!
//! ```toml
//! [grid]
//! beta = 10.0
//! fermionic_frequencies = 16
//! bosonic_frequencies = 4
//! momentum_points = 8
//!
//! [vertex]
//! interaction = 2.0
//! ```
//!
//! and selecting the lattice dimension on the command line with `--dimension d2`.

#![warn(missing_docs)]
#![allow(clippy::type_complexity)]

/// The command line application, configuration and tracing
pub mod app;

/// The Bethe-Salpeter equation and its solvers
pub mod bethe_salpeter;

/// Particle-hole bubbles
pub mod bubbles;

/// Leading eigenvalues of the ladder kernel
pub mod eigen;

/// Error handling
mod error;

/// Lattice dispersions and non-interacting Green's functions
pub mod lattice;

pub use error::{BuildError, EigenError};
