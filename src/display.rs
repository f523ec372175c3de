//! Verbosity-gated diagnostics, shared by all three binaries.
//!
//! Mirrors the teacher crate's `cli::constants` display-level machinery:
//! a single process-wide atomic level plus three small macros standing in
//! for the original's `DISPLAYOUT` / `DISPLAY` / `DISPLAYLEVEL` macros.
//!
//! 0 = silent, 1 = errors/warnings only, 2 = normal (default), 3 = progress,
//! 4 = verbose (buffer sizing, per-block bookkeeping).

use std::sync::atomic::{AtomicU32, Ordering};

/// Process-wide notification level. Corresponds to `g_displayLevel` /
/// `DISPLAY_LEVEL` in the original C and its Rust port respectively.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Print to stdout, unconditionally. Equivalent to C `DISPLAYOUT(...)`.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { println!($($arg)*) };
}

/// Print to stderr, unconditionally. Equivalent to C `DISPLAY(...)`.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprintln!($($arg)*) };
}

/// Print to stderr only if the current display level is `>= level`.
/// Equivalent to C `DISPLAYLEVEL(l, ...)`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::display::display_level() >= $level {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_normal() {
        // Other tests in this process may have mutated the global; just
        // check it is in the documented range and round-trips.
        let prev = display_level();
        set_display_level(3);
        assert_eq!(display_level(), 3);
        set_display_level(prev);
    }
}
