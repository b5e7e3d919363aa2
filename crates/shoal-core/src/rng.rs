//! Injectable random sources.
//!
//! # Determinism strategy
//!
//! The simulation never calls a global RNG.  It owns exactly one
//! [`RandomSource`], handed in at construction, and consumes draws from it in
//! a fixed order:
//!
//! - at spawn: per agent, one draw for the appearance variant, three for the
//!   position, two for the heading;
//! - per frame: one draw per agent (the wander step), in registration order.
//!
//! Two runs with the same source state and the same `dt` sequence are
//! therefore bit-identical.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Next draw, uniform in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform draw in `[min, max)`, computed as `unit * (max - min) + min`.
    #[inline]
    fn range(&mut self, min: f64, max: f64) -> f64 {
        self.next_unit() * (max - min) + min
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Seeded simulation RNG backed by `SmallRng`.
///
/// Used only in single-threaded contexts: the parallel snapshot phase draws
/// all of its randomness up front, before any worker starts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, for giving
    /// independent subsystems (e.g. spawn vs. wander) their own stream.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

impl RandomSource for SimRng {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── ReplayRng ─────────────────────────────────────────────────────────────────

/// Replays a fixed list of unit draws, wrapping around at the end.
///
/// Handy for scripted runs and tests that need to know exactly which value
/// each draw returns.  An empty list always yields `0.5`, which maps to the
/// midpoint of any [`RandomSource::range`].
#[derive(Clone, Debug)]
pub struct ReplayRng {
    draws:  Vec<f64>,
    cursor: usize,
}

impl ReplayRng {
    /// Draws outside `[0, 1)` are clamped into it.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        let draws = draws
            .into_iter()
            .map(|d| if d.is_finite() { d.clamp(0.0, 1.0 - f64::EPSILON) } else { 0.5 })
            .collect();
        Self { draws, cursor: 0 }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ReplayRng {
    fn next_unit(&mut self) -> f64 {
        let value = if self.draws.is_empty() {
            0.5
        } else {
            self.draws[self.cursor % self.draws.len()]
        };
        self.cursor += 1;
        value
    }
}
