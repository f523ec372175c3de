//! The trailing summary record written at the end of every encoded stream.
//!
//! Corresponds to `sfs_footer_t` in `sfs.h`. The C struct is written with a
//! single `fwrite(&footer, sizeof(footer), 1, dfp)`, which bakes in the
//! host's native struct layout (including padding and endianness); this
//! port instead defines an explicit little-endian wire layout so encoder
//! and decoder agree regardless of host architecture.

use std::io::{self, Read, Write};

use crate::config::WORD_SIZE;

/// On-wire size of [`Footer`]: three `u64` fields, one `f64`, one `u64`.
pub const FOOTER_SIZE: usize = 4 * WORD_SIZE;

/// Trailing summary record: total bytes read, total bytes written
/// (including the footer itself), the resulting size ratio, and the number
/// of atomic blocks emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Footer {
    /// Total bytes consumed from the input stream.
    pub read: u64,
    /// Total bytes emitted to the encoded stream, footer included.
    pub written: u64,
    /// `written / read`, informational only.
    pub ratio: f64,
    /// Count of atomic blocks emitted.
    pub atomic_blocks: u64,
}

impl Footer {
    /// Serializes the footer in wire order: read, written, ratio, atomic_blocks.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.read.to_le_bytes())?;
        w.write_all(&self.written.to_le_bytes())?;
        w.write_all(&self.ratio.to_le_bytes())?;
        w.write_all(&self.atomic_blocks.to_le_bytes())?;
        Ok(())
    }

    /// Parses a footer from exactly [`FOOTER_SIZE`] bytes read from `r`.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Footer> {
        let mut buf = [0u8; FOOTER_SIZE];
        r.read_exact(&mut buf)?;
        Ok(Footer {
            read: u64::from_le_bytes(buf[0..8].try_into().unwrap()),
            written: u64::from_le_bytes(buf[8..16].try_into().unwrap()),
            ratio: f64::from_le_bytes(buf[16..24].try_into().unwrap()),
            atomic_blocks: u64::from_le_bytes(buf[24..32].try_into().unwrap()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_wire_format() {
        let f = Footer {
            read: 8192,
            written: 48,
            ratio: 48.0 / 8192.0,
            atomic_blocks: 0,
        };
        let mut buf = Vec::new();
        f.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), FOOTER_SIZE);

        let mut cursor = &buf[..];
        let parsed = Footer::read_from(&mut cursor).unwrap();
        assert_eq!(parsed, f);
    }

    #[test]
    fn field_order_is_read_written_ratio_atomic_blocks() {
        let f = Footer {
            read: 1,
            written: 2,
            ratio: 3.5,
            atomic_blocks: 4,
        };
        let mut buf = Vec::new();
        f.write_to(&mut buf).unwrap();
        assert_eq!(u64::from_le_bytes(buf[0..8].try_into().unwrap()), 1);
        assert_eq!(u64::from_le_bytes(buf[8..16].try_into().unwrap()), 2);
        assert_eq!(f64::from_le_bytes(buf[16..24].try_into().unwrap()), 3.5);
        assert_eq!(u64::from_le_bytes(buf[24..32].try_into().unwrap()), 4);
    }

    #[test]
    fn short_read_is_an_error() {
        let mut cursor: &[u8] = &[1, 2, 3];
        assert!(Footer::read_from(&mut cursor).is_err());
    }
}
