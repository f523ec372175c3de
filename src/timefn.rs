//! Monotonic timestamp helper used for the `sfsz`/`sfsuz` "done in N seconds"
//! completion diagnostic.
//!
//! Retained from the teacher crate's `timefn` module almost unchanged:
//! `std::time::Instant` is monotonic on every platform we target, so there
//! is no need for the platform-specific C timer shims the original ported
//! from (`clock_gettime`, `QueryPerformanceCounter`, ...).

use std::time::Instant;

/// Nanosecond duration type.
pub type DurationNs = u64;

/// Opaque timestamp; only meaningful relative to another `TimeT`.
#[derive(Clone, Copy)]
pub struct TimeT {
    t: Instant,
}

/// Returns the current monotonic timestamp.
pub fn get_time() -> TimeT {
    TimeT { t: Instant::now() }
}

/// Nanoseconds elapsed since `clock_start`.
pub fn clock_span_ns(clock_start: TimeT) -> DurationNs {
    clock_start.t.elapsed().as_nanos() as DurationNs
}
