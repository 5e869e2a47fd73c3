//! Decision-loop time model.
//!
//! # Design
//!
//! Strategies and the whiteboard reason in seconds (`Timestamp`, an `f64`),
//! because timeouts, cooldowns and recency windows are all configured in
//! seconds.  The control loop itself counts integer `Tick`s; `TickClock`
//! maps one to the other:
//!
//!   now = start + tick * tick_duration_secs
//!
//! Nothing here reads the wall clock.  Tests and the demo drive the clock
//! explicitly, which keeps every tick deterministic.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute control-loop tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── Timestamp ────────────────────────────────────────────────────────────────

/// Seconds since the decision core started.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0.0);

    #[inline]
    pub fn from_secs(secs: f64) -> Self {
        Timestamp(secs)
    }

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self`.  Negative if `earlier` is later.
    ///
    /// Window checks compare against `earlier + secs` instead, so that a query
    /// made at exactly `earlier + secs` lands on the boundary.
    #[inline]
    pub fn since(self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<f64> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, rhs: f64) -> Timestamp {
        Timestamp(self.0 + rhs)
    }
}

impl std::ops::Sub for Timestamp {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: Timestamp) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// ── TickClock ────────────────────────────────────────────────────────────────

/// Converts tick counts to [`Timestamp`]s.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickClock {
    /// Timestamp of tick 0.
    pub start: Timestamp,
    /// How many seconds one tick represents.
    pub tick_duration_secs: f64,
    /// The current tick, advanced by `TickClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl TickClock {
    pub fn new(start: Timestamp, tick_duration_secs: f64) -> Self {
        Self {
            start,
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.offset(1);
    }

    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_duration_secs
    }

    /// Timestamp corresponding to `current_tick`.
    #[inline]
    pub fn now(&self) -> Timestamp {
        self.start + self.elapsed_secs()
    }

    /// Number of whole ticks needed to cover `secs` (rounded up).
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        if secs <= 0.0 {
            return 0;
        }
        (secs / self.tick_duration_secs).ceil() as u64
    }
}
