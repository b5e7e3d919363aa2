//! Frame counting.
//!
//! The simulation has no clock of its own: the presentation layer measures
//! wall time and hands a `dt` to every step.  `FrameClock` just records how
//! many frames have run and how much simulated time they covered, for
//! logging and observers.

use std::fmt;

// ── Frame ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);

    /// `true` when this frame lands on a multiple of `interval`.
    /// An interval of 0 never matches.
    #[inline]
    pub fn is_every(self, interval: u64) -> bool {
        interval > 0 && self.0.is_multiple_of(interval)
    }
}

impl std::ops::Add<u64> for Frame {
    type Output = Frame;
    #[inline]
    fn add(self, rhs: u64) -> Frame {
        Frame(self.0 + rhs)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Current frame plus the simulated seconds accumulated so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameClock {
    pub current_frame: Frame,
    pub elapsed_secs:  f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame that covered `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.current_frame = self.current_frame + 1;
        self.elapsed_secs += dt;
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3} s)", self.current_frame, self.elapsed_secs)
    }
}
