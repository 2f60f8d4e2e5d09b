// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Matsubara Grids
//!
//! Discrete imaginary frequencies `iπ(2n + ζ)/β` where `ζ = 1` for fermions and `ζ = 0` for
//! bosons. Grid points are addressed by their integer Matsubara number `n`, so shifting a
//! fermionic frequency by a bosonic one is exact integer arithmetic.

use crate::GridError;
use num_complex::Complex64;
use std::f64::consts::PI;
use std::marker::PhantomData;

/// Marker trait distinguishing fermionic and bosonic frequency grids
pub trait Statistics: Copy + Clone + std::fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Offset in `iπ(2n + ZETA)/β`
    const ZETA: i64;
    const NAME: &'static str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fermionic;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bosonic;

impl Statistics for Fermionic {
    const ZETA: i64 = 1;
    const NAME: &'static str = "fermionic";
}

impl Statistics for Bosonic {
    const ZETA: i64 = 0;
    const NAME: &'static str = "bosonic";
}

/// The Matsubara frequency with integer index `n` at inverse temperature `beta`
pub fn matsubara_value<S: Statistics>(n: i64, beta: f64) -> Complex64 {
    Complex64::new(0., PI * (2 * n + S::ZETA) as f64 / beta)
}

/// Recovers the integer index of a Matsubara frequency, rounding to the nearest integer
pub fn matsubara_number<S: Statistics>(value: Complex64, beta: f64) -> i64 {
    ((value.im * beta / PI - S::ZETA as f64) / 2.).round() as i64
}

/// A single point on a `MatsubaraGrid`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatsubaraPoint<S> {
    index: usize,
    n: i64,
    value: Complex64,
    marker: PhantomData<S>,
}

impl<S: Statistics> MatsubaraPoint<S> {
    /// Position of the point in the grid's storage
    pub fn index(&self) -> usize {
        self.index
    }

    /// The integer Matsubara number
    pub fn n(&self) -> i64 {
        self.n
    }

    pub fn value(&self) -> Complex64 {
        self.value
    }
}

pub type FermionicPoint = MatsubaraPoint<Fermionic>;
pub type BosonicPoint = MatsubaraPoint<Bosonic>;

/// A contiguous block of Matsubara frequencies with integer indices in `[min_n, max_n)`
#[derive(Clone, Debug, PartialEq)]
pub struct MatsubaraGrid<S> {
    beta: f64,
    min_n: i64,
    max_n: i64,
    marker: PhantomData<S>,
}

pub type FermionicGrid = MatsubaraGrid<Fermionic>;
pub type BosonicGrid = MatsubaraGrid<Bosonic>;

impl<S: Statistics> MatsubaraGrid<S> {
    pub fn new(beta: f64, min_n: i64, max_n: i64) -> Result<Self, GridError> {
        if !(beta > 0.) {
            return Err(GridError::NonPositiveBeta(beta));
        }
        if max_n <= min_n {
            return Err(GridError::EmptyRange { min_n, max_n });
        }
        Ok(Self {
            beta,
            min_n,
            max_n,
            marker: PhantomData,
        })
    }

    /// A grid symmetric about zero frequency
    ///
    /// Fermionic grids span `[-n, n)`, which pairs every `iω_n` with `-iω_n`. Bosonic grids
    /// span `[-n + 1, n)` so that `W = 0` sits at the centre.
    pub fn symmetric(beta: f64, number_of_positive_points: usize) -> Result<Self, GridError> {
        let n = number_of_positive_points as i64;
        Self::new(beta, -n + 1 - S::ZETA, n)
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn min_n(&self) -> i64 {
        self.min_n
    }

    pub fn max_n(&self) -> i64 {
        self.max_n
    }

    pub fn len(&self) -> usize {
        (self.max_n - self.min_n) as usize
    }

    /// A grid always holds at least one point
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, n: i64) -> bool {
        n >= self.min_n && n < self.max_n
    }

    /// Storage position of the frequency with Matsubara number `n`, if it is on the grid
    pub fn position_of(&self, n: i64) -> Option<usize> {
        self.contains(n).then(|| (n - self.min_n) as usize)
    }

    /// The point stored at `index`
    ///
    /// # Panics
    /// If `index` lies beyond the end of the grid
    pub fn point(&self, index: usize) -> MatsubaraPoint<S> {
        assert!(
            index < self.len(),
            "Index {index} is outside a {} grid of {} points",
            S::NAME,
            self.len()
        );
        self.make_point(index)
    }

    pub fn try_point(&self, index: usize) -> Option<MatsubaraPoint<S>> {
        (index < self.len()).then(|| self.make_point(index))
    }

    /// The point with Matsubara number `n`
    pub fn point_with_n(&self, n: i64) -> Result<MatsubaraPoint<S>, GridError> {
        self.position_of(n)
            .map(|index| self.make_point(index))
            .ok_or(GridError::OutOfRange {
                n,
                min_n: self.min_n,
                max_n: self.max_n,
            })
    }

    /// The grid point nearest to a frequency value
    pub fn point_from_value(&self, value: Complex64) -> Result<MatsubaraPoint<S>, GridError> {
        self.point_with_n(matsubara_number::<S>(value, self.beta))
    }

    pub fn points(&self) -> impl Iterator<Item = MatsubaraPoint<S>> + '_ {
        (0..self.len()).map(|index| self.make_point(index))
    }

    pub fn values(&self) -> impl Iterator<Item = Complex64> + '_ {
        self.points().map(|point| point.value)
    }

    fn make_point(&self, index: usize) -> MatsubaraPoint<S> {
        let n = self.min_n + index as i64;
        MatsubaraPoint {
            index,
            n,
            value: matsubara_value::<S>(n, self.beta),
            marker: PhantomData,
        }
    }
}
