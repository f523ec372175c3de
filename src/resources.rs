//! Scoped resource release.
//!
//! The original C tools free every open file and heap buffer explicitly on
//! every exit path, via the variadic `close_all_files` / `free_all_mem`
//! helpers in `common.c` called from a `clean_all` / `free_all` wrapper at
//! each `DIE(...)` site. Rust's ownership model makes the buffer half of
//! that pattern automatic (a `Vec<u8>` going out of scope frees itself), but
//! spec §4.4 still asks for an explicit scope that guarantees release on
//! every exit path, including ones where a validation check fails mid-block
//! and the function returns early via `?`.
//!
//! [`ResourceScope`] plays that role: callers register fallible-to-close
//! resources (anything exposing a `close(self) -> io::Result<()>`-shaped
//! closure) and the scope runs every registered closer when it is dropped,
//! regardless of which `?` caused the unwind. Closers run in registration
//! order, matching `close_all_files`'s left-to-right iteration over its
//! variadic argument list.

use std::io;

/// A guard that runs a batch of cleanup closures exactly once, on drop.
///
/// Each closure is a `FnOnce() -> io::Result<()>`; failures are collected
/// rather than propagated (there is nowhere to propagate them to from
/// inside `Drop`), but the first failure per closer is logged via
/// [`crate::displaylevel!`] at level 1, mirroring the original's
/// `fprintf(stderr, "Unable to close destination file correctly. Skipping\n")`.
#[derive(Default)]
pub struct ResourceScope {
    closers: Vec<Box<dyn FnOnce() -> io::Result<()>>>,
}

impl ResourceScope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        ResourceScope::default()
    }

    /// Registers a closure to run when this scope is dropped.
    pub fn defer<F>(&mut self, closer: F)
    where
        F: FnOnce() -> io::Result<()> + 'static,
    {
        self.closers.push(Box::new(closer));
    }

    /// Runs all registered closers now, in registration order, consuming
    /// the scope. Returns the first error encountered, if any, after
    /// still running every remaining closer (best-effort, matching the
    /// original's "skip and continue" behaviour).
    pub fn release(mut self) -> io::Result<()> {
        self.run_all()
    }

    fn run_all(&mut self) -> io::Result<()> {
        let mut first_err = None;
        for closer in self.closers.drain(..) {
            if let Err(e) = closer() {
                crate::displaylevel!(1, "warning: resource cleanup failed: {}", e);
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for ResourceScope {
    fn drop(&mut self) {
        let _ = self.run_all();
    }
}
