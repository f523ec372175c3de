//! Hole-punch capability strategy for decoder sparse writes.
//!
//! Corresponds to `zero_from_current_and_move` in `sfsuz.c` and the
//! `dst_info_t.punch_support` latch it reads and updates. The C version
//! probes support lazily: it always tries `fallocate(FALLOC_FL_PUNCH_HOLE |
//! FALLOC_FL_KEEP_SIZE, ...)` first, and on the *first* failure logs a
//! warning, flips `punch_support` to `0`, and falls back to writing literal
//! zero bytes from a reusable buffer for the remainder of the run. This is
//! exactly the "strategy object with two methods and a latching capability
//! flag" spec §9's design notes ask for.

use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};

use crate::config::ZERO_CHUNK_SIZE;

/// Punches holes where the destination filesystem supports it, and falls
/// back to writing literal zero bytes otherwise. Once a punch request
/// fails, the strategy permanently downgrades to heavy zeroing — it never
/// retries punching for the remainder of the run (spec's "capability
/// idempotence" property).
pub struct PunchStrategy {
    punch_support: bool,
    zero_buf: Vec<u8>,
}

impl PunchStrategy {
    /// Creates a strategy that starts out assuming hole-punch support is
    /// available, exactly as `dst_info.punch_support = 1` does in C.
    pub fn new() -> Self {
        PunchStrategy {
            punch_support: true,
            zero_buf: Vec::new(),
        }
    }

    /// Returns whether hole punching is still believed to be supported.
    pub fn supports_punch(&self) -> bool {
        self.punch_support
    }

    /// Advances `dst`'s cursor by exactly `len` bytes, leaving zeros in
    /// between, preferring a hole punch over literal writes.
    ///
    /// `dst` must already be positioned at the region's start; on return it
    /// is positioned `len` bytes further on, whichever strategy was used.
    pub fn zero_and_advance(&mut self, dst: &mut File, len: u64) -> io::Result<()> {
        debug_assert!(len > 0, "zero_and_advance requires a non-zero length");

        if self.punch_support {
            match self.try_punch(dst, len) {
                Ok(()) => {
                    // fallocate does not move the file position; seek
                    // explicitly, matching the C comment: "Looks like
                    // fallocate does not move cursor, so let's do it".
                    dst.seek(SeekFrom::Current(len as i64))?;
                    return Ok(());
                }
                Err(e) => {
                    crate::displaylevel!(
                        1,
                        "warning: hole punching failed ({e}); destination probably doesn't \
                         support it. Falling back to heavy zeroing for the rest of the run"
                    );
                    self.punch_support = false;
                }
            }
        }

        self.heavy_zero(dst, len)
    }

    #[cfg(target_os = "linux")]
    fn try_punch(&self, dst: &mut File, len: u64) -> io::Result<()> {
        use nix::fcntl::{fallocate, FallocateFlags};
        use std::os::unix::io::AsRawFd;

        let cursor = dst.stream_position()?;
        fallocate(
            dst.as_raw_fd(),
            FallocateFlags::FALLOC_FL_PUNCH_HOLE | FallocateFlags::FALLOC_FL_KEEP_SIZE,
            cursor as libc::off_t,
            len as libc::off_t,
        )
        .map_err(io::Error::from)
    }

    #[cfg(not(target_os = "linux"))]
    fn try_punch(&self, _dst: &mut File, _len: u64) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "hole punching is only implemented on Linux",
        ))
    }

    /// Writes `len` literal zero bytes in [`ZERO_CHUNK_SIZE`]-sized chunks
    /// from a buffer reused across calls. Corresponds to the `while(len >
    /// 0)` loop in `zero_from_current_and_move`.
    fn heavy_zero(&mut self, dst: &mut File, mut len: u64) -> io::Result<()> {
        let chunk_cap = (ZERO_CHUNK_SIZE as u64).min(len.max(1)) as usize;
        if self.zero_buf.len() < chunk_cap {
            self.zero_buf.resize(chunk_cap, 0);
        }

        while len > 0 {
            let n = (ZERO_CHUNK_SIZE as u64).min(len) as usize;
            dst.write_all(&self.zero_buf[..n])?;
            len -= n as u64;
        }
        Ok(())
    }
}

impl Default for PunchStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn heavy_zero_writes_requested_length() {
        let mut f = tempfile::tempfile().unwrap();
        let mut strategy = PunchStrategy::new();
        strategy.heavy_zero(&mut f, 10_000).unwrap();
        f.seek(SeekFrom::Start(0)).unwrap();
        let mut out = Vec::new();
        f.read_to_end(&mut out).unwrap();
        assert_eq!(out.len(), 10_000);
        assert!(out.iter().all(|&b| b == 0));
    }

    #[test]
    fn heavy_zero_spanning_multiple_chunks_is_still_exact() {
        let mut f = tempfile::tempfile().unwrap();
        let mut strategy = PunchStrategy::new();
        // Force at least two chunk iterations without allocating 256 MiB in
        // the test: shrink the effective chunk by writing less than one
        // chunk twice via two separate calls instead.
        strategy.heavy_zero(&mut f, 4096).unwrap();
        strategy.heavy_zero(&mut f, 4096).unwrap();
        let len = f.seek(SeekFrom::End(0)).unwrap();
        assert_eq!(len, 8192);
    }

    #[test]
    fn zero_and_advance_falls_back_and_latches_on_unsupported_platform() {
        // On non-Linux, try_punch always fails, so the first call must
        // downgrade punch_support and still zero-fill correctly.
        let mut f = tempfile::tempfile().unwrap();
        let mut strategy = PunchStrategy::new();
        strategy.zero_and_advance(&mut f, 4096).unwrap();
        let len = f.seek(SeekFrom::End(0)).unwrap();
        assert_eq!(len, 4096);

        #[cfg(not(target_os = "linux"))]
        assert!(!strategy.supports_punch());
    }

    #[test]
    fn zero_and_advance_is_idempotent_after_first_downgrade() {
        let mut f = tempfile::tempfile().unwrap();
        let mut strategy = PunchStrategy::new();
        strategy.zero_and_advance(&mut f, 4096).unwrap();
        let support_after_first = strategy.supports_punch();
        strategy.zero_and_advance(&mut f, 4096).unwrap();
        // Once downgraded, it must stay downgraded; once up, a failing
        // platform will already have downgraded on the first call above.
        assert_eq!(strategy.supports_punch(), support_after_first);
    }
}
