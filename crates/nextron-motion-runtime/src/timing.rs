//! Time calculation utilities for transitions
//!
//! Pure functions over explicit instants so every player can be driven by a
//! paused clock in tests.

use std::time::Duration;

use tokio::time::Instant;

/// Seconds elapsed between `start` and `now`, zero if `now` is earlier
#[inline]
pub fn elapsed_secs(start: Instant, now: Instant) -> f64 {
    now.saturating_duration_since(start).as_secs_f64()
}

/// Convert token seconds to a `Duration`, clamping negatives to zero
#[inline]
pub fn secs(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::from_secs_f64(value)
    } else {
        Duration::ZERO
    }
}

/// Linear progress (0.0 to 1.0) of a transition `elapsed` seconds after its
/// group started, given its own delay and duration
///
/// A zero duration jumps from 0 to 1 once the delay has passed.
#[inline]
pub fn progress(elapsed: f64, delay: f64, duration: f64) -> f64 {
    let local = elapsed - delay;
    if local < 0.0 {
        return 0.0;
    }
    if duration <= 0.0 {
        return 1.0;
    }
    (local / duration).clamp(0.0, 1.0)
}

/// Check if a transition is complete
#[inline]
pub fn is_complete(elapsed: f64, delay: f64, duration: f64) -> bool {
    elapsed >= delay + duration.max(0.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
