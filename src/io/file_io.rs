//! Source/destination resolution shared by all three binaries.
//!
//! Adapted from the teacher crate's `io::file_io`: the `"-"` sentinel for
//! stdin/stdout is a direct carry-over of that module's `STDIN_MARK`/
//! `STDOUT_MARK` pattern (the original C tools use the same convention via
//! `strcmp(sfilename, "-") == 0` in `sfsz.c`/`sfsuz.c`). The destination
//! side is narrower than the teacher's: spec §1 rules out non-seekable
//! decoder destinations entirely, so [`open_dst_for_decode`] never accepts
//! the stdout sentinel and always opens a real path without truncation
//! (mirroring `sfsuz.c`'s `open(dfilename, O_WRONLY | O_CREAT, 0600)` +
//! `fdopen`, deliberately never `fopen(..., "wb")` which would truncate).

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Sentinel meaning "use standard input" / "use standard output".
pub const STDIN_STDOUT_MARK: &str = "-";

/// Opens `path` for reading, returning a boxed [`Read`].
///
/// `"-"` means standard input. Directories are rejected.
pub fn open_src(path: &str) -> io::Result<Box<dyn Read>> {
    if path == STDIN_STDOUT_MARK {
        crate::displaylevel!(4, "reading from stdin");
        return Ok(Box::new(io::stdin()));
    }

    let p = Path::new(path);
    if p.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path}: is a directory"),
        ));
    }

    let f = File::open(p).map_err(|e| {
        crate::displaylevel!(1, "{path}: {e}");
        e
    })?;
    Ok(Box::new(BufReader::new(f)))
}

/// Opens `path` for writing, truncating/creating as needed, returning a
/// boxed [`io::Write`].
///
/// `"-"` means standard output. Used only by the encoder: the encoded
/// stream has no positional-I/O requirement, unlike the decoder's
/// destination.
pub fn open_dst_for_encode(path: &str) -> io::Result<Box<dyn io::Write>> {
    if path == STDIN_STDOUT_MARK {
        crate::displaylevel!(4, "writing to stdout");
        return Ok(Box::new(io::stdout()));
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            crate::displaylevel!(1, "{path}: {e}");
            e
        })?;
    Ok(Box::new(f))
}

/// Opens `path` as the decoder's destination: a real, seekable file,
/// created if absent but **never truncated** if it already exists (the
/// destination may be a preallocated file or block device whose existing
/// length matters — spec §4.2).
///
/// Rejects the stdin/stdout sentinel outright: the decoder requires
/// positional I/O (hole punching, seeking for the trailing zero region),
/// which a pipe cannot provide.
pub fn open_dst_for_decode(path: &str) -> io::Result<File> {
    if path == STDIN_STDOUT_MARK {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "decoder destination must be a regular seekable path, not stdout",
        ));
    }

    OpenOptions::new()
        .write(true)
        .read(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|e| {
            crate::displaylevel!(1, "{path}: {e}");
            e
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom, Write};

    #[test]
    fn open_src_nonexistent_errs() {
        assert!(open_src("/nonexistent/path/for/sure.bin").is_err());
    }

    #[test]
    fn open_dst_for_decode_does_not_truncate_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dst.bin");
        std::fs::write(&path, b"existing content").unwrap();

        let mut f = open_dst_for_decode(path.to_str().unwrap()).unwrap();
        let len = f.seek(SeekFrom::End(0)).unwrap();
        assert_eq!(len, "existing content".len() as u64);
    }

    #[test]
    fn open_dst_for_decode_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.bin");
        let mut f = open_dst_for_decode(path.to_str().unwrap()).unwrap();
        f.write_all(b"hi").unwrap();
        drop(f);
        assert_eq!(std::fs::read(&path).unwrap(), b"hi");
    }

    #[test]
    fn open_dst_for_decode_rejects_stdout_sentinel() {
        assert!(open_dst_for_decode(STDIN_STDOUT_MARK).is_err());
    }

    #[test]
    fn open_dst_for_encode_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dst.bin");
        std::fs::write(&path, b"old content here").unwrap();
        let mut f = open_dst_for_encode(path.to_str().unwrap()).unwrap();
        f.write_all(b"new").unwrap();
        drop(f);
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }
}
