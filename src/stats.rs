//! The `sfsstats` reader: extracts the trailing footer record from an
//! already-encoded stream.
//!
//! Corresponds to `sfs_stats.c`'s `main`, which opens the file read-only and
//! calls the shared `extract_footer(sfp, 0)` (seek from the end, unlike the
//! decoder which is already positioned and passes `skip_repositionning = 1`
//! — see [`crate::footer::Footer::read_from`], used directly by the decoder
//! once it reaches the sentinel).

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use crate::footer::{Footer, FOOTER_SIZE};

/// Opens `path` read-only and returns its trailing footer.
pub fn read_stats(path: &str) -> io::Result<Footer> {
    let mut f = File::open(path)?;
    read_footer_from_end(&mut f)
}

/// Seeks an open, readable, seekable stream to its trailing footer and
/// reads it.
pub fn read_footer_from_end<F: Read + Seek>(f: &mut F) -> io::Result<Footer> {
    f.seek(SeekFrom::End(-(FOOTER_SIZE as i64)))?;
    Footer::read_from(f)
}
