//! Reconstruction engine: replays each atomic block's boundary vector
//! against its payload, preferring filesystem hole-punching over explicit
//! zero writes, and validates the trailing footer.
//!
//! Grounded on `sfsuz.c`'s main read loop, `zero_from_current_and_move`
//! (here [`crate::sparse::PunchStrategy::zero_and_advance`]), and the
//! footer/`inflated` cross-checks at the end of that loop.
//!
//! `boundaries[0]` must always be exactly `0` (`sfsuz.c`: `if(... ||
//! data_boundaries[0] != 0) DIE(...)`) — the encoder always emits it as a
//! fixed placeholder, never a real sparse length. Beyond index 0, a pair
//! with *either* component zero is a format error, not just a pair with
//! both zero (`sfsuz.c`: `if(data_length == 0 || data_seek == 0) { if(i >
//! 0) DIE(...); ... }`).

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::codec::boundary::max_boundary_count;
use crate::config::{BLK_SIZE, MAX_PAYLOAD_SIZE, SENTINEL, WORD_SIZE};
use crate::footer::Footer;
use crate::sparse::PunchStrategy;

/// Summary of one decoding run, taken from the validated footer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecodeReport {
    pub read: u64,
    pub written: u64,
    pub atomic_blocks: u64,
}

fn format_error(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

fn read_u64<R: Read>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; WORD_SIZE];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Writes `len` literal zero bytes directly (never through the hole-punch
/// path). Spec §4.2: the unaligned tail remainder must always be an
/// explicit write since hole-punch only operates on ranges the filesystem
/// considers worth punching.
fn write_zeros<W: Write>(dst: &mut W, len: u64) -> io::Result<()> {
    let buf = vec![0u8; len as usize];
    dst.write_all(&buf)
}

/// Decodes the stream read from `src`, reconstructing it into `dst`.
///
/// `dst` must already be positioned at the start of the region to write
/// (callers open it via [`crate::io::file_io::open_dst_for_decode`], which
/// never truncates). `src` need not be seekable — the footer is read
/// in-line immediately after the sentinel, not via a seek to the end.
pub fn decode<R: Read>(src: &mut R, dst: &mut File) -> io::Result<DecodeReport> {
    let random_size_bytes = read_u64(src)?;
    let mut random_buf = vec![0u8; random_size_bytes as usize];

    let mut payload: Vec<u8> = Vec::new();
    let mut punch = PunchStrategy::new();

    let mut inflated: u64 = 0;
    let mut atomic_blocks: u64 = 0;
    let mut bytes_read: u64 = WORD_SIZE as u64;

    loop {
        let payload_size = read_u64(src)?;
        bytes_read += WORD_SIZE as u64;
        if payload_size == SENTINEL {
            break;
        }
        if payload_size == 0 || payload_size > MAX_PAYLOAD_SIZE {
            return Err(format_error(format!(
                "atomic block payload_size {payload_size} out of range"
            )));
        }

        if random_size_bytes > 0 {
            src.read_exact(&mut random_buf)?;
            bytes_read += random_size_bytes;
        }

        if (payload.len() as u64) < payload_size {
            payload.resize(payload_size as usize, 0);
        }
        let payload_slice = &mut payload[..payload_size as usize];
        src.read_exact(payload_slice)?;
        bytes_read += payload_size;

        let boundary_count = read_u64(src)?;
        bytes_read += WORD_SIZE as u64;
        if boundary_count == 0 || boundary_count % 2 != 0 {
            return Err(format_error(format!(
                "boundary_count {boundary_count} must be positive and even"
            )));
        }
        if boundary_count > max_boundary_count(payload_size) {
            return Err(format_error(format!(
                "boundary_count {boundary_count} exceeds bound for payload_size {payload_size}"
            )));
        }

        let mut boundaries = Vec::with_capacity(boundary_count as usize);
        for _ in 0..boundary_count {
            boundaries.push(read_u64(src)?);
            bytes_read += WORD_SIZE as u64;
        }
        if boundaries[0] != 0 {
            return Err(format_error(format!(
                "boundaries[0] must be 0, found {}",
                boundaries[0]
            )));
        }

        let mut payload_consumed: usize = 0;
        for (idx, pair) in boundaries.chunks_exact(2).enumerate() {
            let (sparse_len, data_len) = (pair[0], pair[1]);
            if (sparse_len == 0 || data_len == 0) && idx != 0 {
                return Err(format_error(
                    "a zero-length sparse or data length is only legal at index 0",
                ));
            }

            if sparse_len > 0 {
                punch.zero_and_advance(dst, sparse_len)?;
            }
            if data_len > 0 {
                let end = payload_consumed + data_len as usize;
                if end > payload_size as usize {
                    return Err(format_error("data range exceeds payload bounds"));
                }
                dst.write_all(&payload[payload_consumed..end])?;
                payload_consumed = end;
            }
            inflated += sparse_len + data_len;
        }

        if payload_consumed as u64 != payload_size {
            return Err(format_error(
                "sum of data lengths does not equal payload_size",
            ));
        }

        atomic_blocks += 1;
    }

    let footer = Footer::read_from(src)?;
    bytes_read += crate::footer::FOOTER_SIZE as u64;

    if footer.written != bytes_read {
        return Err(format_error(format!(
            "footer.written ({}) does not match bytes actually read ({bytes_read})",
            footer.written
        )));
    }
    if footer.atomic_blocks != atomic_blocks {
        return Err(format_error(format!(
            "footer.atomic_blocks ({}) does not match observed blocks ({atomic_blocks})",
            footer.atomic_blocks
        )));
    }
    if footer.read < inflated {
        return Err(format_error(format!(
            "footer.read ({}) is less than the reconstructed length so far ({inflated})",
            footer.read
        )));
    }

    let tail = footer.read - inflated;
    if tail > 0 {
        let aligned = ((tail - 1) / BLK_SIZE as u64) * BLK_SIZE as u64;
        let remainder = ((tail - 1) % BLK_SIZE as u64) + 1;
        if aligned > 0 {
            punch.zero_and_advance(dst, aligned)?;
        }
        write_zeros(dst, remainder)?;
    }

    let expected_end = dst.stream_position()?;
    let actual_len = dst.seek(SeekFrom::End(0))?;
    if actual_len < expected_end {
        crate::displaylevel!(
            1,
            "warning: destination is shorter ({actual_len} bytes) than the reconstructed length ({expected_end} bytes)"
        );
    }

    Ok(DecodeReport {
        read: footer.read,
        written: footer.written,
        atomic_blocks: footer.atomic_blocks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encoder::{encode, EncoderConfig};
    use std::io::{Cursor, Read as _};
    use tempfile::tempfile;

    fn roundtrip(input: &[u8]) -> Vec<u8> {
        let mut stream = Vec::new();
        let mut src = Cursor::new(input);
        encode(&mut src, &mut stream, &EncoderConfig::default()).unwrap();

        let mut dst = tempfile().unwrap();
        let mut stream_cursor = Cursor::new(stream);
        decode(&mut stream_cursor, &mut dst).unwrap();

        dst.seek(SeekFrom::Start(0)).unwrap();
        let mut out = Vec::new();
        dst.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn all_zero_input_round_trips_via_trailing_tail() {
        let input = vec![0u8; 8192];
        assert_eq!(roundtrip(&input), input);
    }

    #[test]
    fn mixed_sparse_data_sparse_round_trips() {
        let mut input = vec![0u8; 4096];
        input.extend(std::iter::repeat(0x5Au8).take(4096));
        input.extend(std::iter::repeat(0u8).take(4096));
        assert_eq!(roundtrip(&input), input);
    }

    #[test]
    fn rejects_odd_boundary_count() {
        // header: random_size_bytes = 0
        let mut stream = Vec::new();
        stream.extend_from_slice(&0u64.to_le_bytes());
        // one block: payload_size=4, payload=[1,2,3,4], boundary_count=3 (odd)
        stream.extend_from_slice(&4u64.to_le_bytes());
        stream.extend_from_slice(&[1, 2, 3, 4]);
        stream.extend_from_slice(&3u64.to_le_bytes());
        stream.extend_from_slice(&0u64.to_le_bytes());
        stream.extend_from_slice(&4u64.to_le_bytes());
        stream.extend_from_slice(&0u64.to_le_bytes());

        let mut dst = tempfile().unwrap();
        let mut src = Cursor::new(stream);
        let result = decode(&mut src, &mut dst);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn rejects_payload_size_exceeding_bound() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&0u64.to_le_bytes());
        stream.extend_from_slice(&(MAX_PAYLOAD_SIZE + 1).to_le_bytes());

        let mut dst = tempfile().unwrap();
        let mut src = Cursor::new(stream);
        assert!(decode(&mut src, &mut dst).is_err());
    }

    #[test]
    fn rejects_footer_atomic_blocks_mismatch() {
        let input = vec![0xCCu8; 4096];
        let mut stream = Vec::new();
        let mut src = Cursor::new(&input);
        encode(&mut src, &mut stream, &EncoderConfig::default()).unwrap();

        // Corrupt the footer's atomic_blocks field (last 8 bytes).
        let len = stream.len();
        let corrupt_at = len - WORD_SIZE;
        stream[corrupt_at..].copy_from_slice(&99u64.to_le_bytes());

        let mut dst = tempfile().unwrap();
        let mut src2 = Cursor::new(stream);
        let result = decode(&mut src2, &mut dst);
        assert!(result.is_err());
    }

    #[test]
    fn zero_length_pair_only_legal_at_index_zero() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&0u64.to_le_bytes());
        // payload_size=4, payload, boundary_count=4, boundaries=[0,4,0,0]
        // (a zero/zero pair at index 1, which must be rejected)
        stream.extend_from_slice(&4u64.to_le_bytes());
        stream.extend_from_slice(&[9, 9, 9, 9]);
        stream.extend_from_slice(&4u64.to_le_bytes());
        for v in [0u64, 4, 0, 0] {
            stream.extend_from_slice(&v.to_le_bytes());
        }

        let mut dst = tempfile().unwrap();
        let mut src = Cursor::new(stream);
        assert!(decode(&mut src, &mut dst).is_err());
    }

    #[test]
    fn rejects_nonzero_boundaries_zero() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&0u64.to_le_bytes());
        // payload_size=4, payload, boundary_count=2, boundaries=[4,4]
        // (boundaries[0] must always be 0)
        stream.extend_from_slice(&4u64.to_le_bytes());
        stream.extend_from_slice(&[9, 9, 9, 9]);
        stream.extend_from_slice(&2u64.to_le_bytes());
        for v in [4u64, 4] {
            stream.extend_from_slice(&v.to_le_bytes());
        }

        let mut dst = tempfile().unwrap();
        let mut src = Cursor::new(stream);
        assert!(decode(&mut src, &mut dst).is_err());
    }
}
