//! Random contiguous window selection.
//!
//! The sampler never owns a generator; callers pass a [`RandomSource`] so a
//! run can be replayed with a fixed seed or a fixed draw.

use std::ops::{Deref, RangeInclusive};

use crate::{DetectionError, Observation};

/// Number of consecutive observations in every sampled window.
pub const WINDOW_LEN: usize = 30;

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Return a value drawn uniformly from the closed `range`.
    fn index_in(&mut self, range: RangeInclusive<usize>) -> usize;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn index_in(&mut self, range: RangeInclusive<usize>) -> usize {
        (**self).index_in(range)
    }
}

/// [`fastrand`]-backed random source.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: fastrand::Rng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Seeded when `seed` is given, otherwise entropy-initialised.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

impl RandomSource for SeededRandom {
    fn index_in(&mut self, range: RangeInclusive<usize>) -> usize {
        self.rng.usize(range)
    }
}

/// Always draws the same index, clamped into the requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn index_in(&mut self, range: RangeInclusive<usize>) -> usize {
        self.0.clamp(*range.start(), *range.end())
    }
}

/// A contiguous run of [`WINDOW_LEN`] observations borrowed from a source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<'a> {
    start: usize,
    observations: &'a [Observation],
}

impl<'a> Window<'a> {
    /// Index of the first observation in the source sequence.
    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn observations(&self) -> &'a [Observation] {
        self.observations
    }
}

impl Deref for Window<'_> {
    type Target = [Observation];

    fn deref(&self) -> &Self::Target {
        self.observations
    }
}

/// Picks one window per source, uniformly over all valid start positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowSampler;

impl WindowSampler {
    pub const fn new() -> Self {
        Self
    }

    pub fn sample<'a, R>(
        &self,
        observations: &'a [Observation],
        rng: &mut R,
    ) -> Result<Window<'a>, DetectionError>
    where
        R: RandomSource + ?Sized,
    {
        let available = observations.len();
        if available < WINDOW_LEN {
            return Err(DetectionError::InsufficientData {
                available,
                required: WINDOW_LEN,
            });
        }

        let max_start = available - WINDOW_LEN;
        // A misbehaving source must not push the slice out of bounds.
        let start = rng.index_in(0..=max_start).min(max_start);

        Ok(Window {
            start,
            observations: &observations[start..start + WINDOW_LEN],
        })
    }
}
