//! Streaming compressor: scans fixed-size sectors, alternates between
//! sparse and copy modes, and flushes atomic blocks at size or keepalive
//! thresholds.
//!
//! Grounded on `sfsz.c`'s main read loop and `flush_block`. `boundaries[0]`
//! is a fixed `0` placeholder — `sfsz.c` allocates it once before the read
//! loop starts (`data_boundaries[0] = 0;`) and never writes to index 0
//! again; every block's `meta_idx` is reset to `1` on flush, not `0`, so the
//! placeholder is implicitly reused by every atomic block, not just the
//! first. The encoder here mirrors that by always starting (and resetting,
//! after each flush) the boundary vector as `vec![0]` with the mode
//! bookkeeping primed as if a zero-length copy run were already open —
//! exactly `sfsz.c`'s own starting assumption, stated in its comment "we
//! start assuming the beginning of the file is not sparse" (`sparse_on =
//! 0`). The first real transition then closes that zero-length placeholder
//! run at index 1, which is why a block whose region opens with a sparse
//! run emits a leading `(0, 0)` pair before the real `(sparse_len,
//! data_len)` one.

use std::io::{self, Read, Write};

use crate::config::{
    BLK_SIZE, DEFAULT_ATOMIC_BLOCK_SIZE, MAX_ATOMIC_BLOCK_SIZE, MAX_RANDOM_SIZE_BYTES, SENTINEL,
    WORD_SIZE,
};
use crate::footer::{Footer, FOOTER_SIZE};

/// Encoder configuration. See spec §4.1 for the meaning of each field.
#[derive(Debug, Clone, Copy)]
pub struct EncoderConfig {
    pub atomic_block_size: u64,
    pub read_keepalive_bytes: u64,
    pub random_size_bytes: u64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            atomic_block_size: DEFAULT_ATOMIC_BLOCK_SIZE,
            read_keepalive_bytes: 0,
            random_size_bytes: 0,
        }
    }
}

impl EncoderConfig {
    /// Builds a config, flooring `random_size_bytes` to a multiple of the
    /// word size used for the pad fill (spec §4.1).
    pub fn new(atomic_block_size: u64, read_keepalive_bytes: u64, random_size_bytes: u64) -> Self {
        EncoderConfig {
            atomic_block_size,
            read_keepalive_bytes,
            random_size_bytes: (random_size_bytes / WORD_SIZE as u64) * WORD_SIZE as u64,
        }
    }

    /// Validates the configured bounds before any I/O happens.
    pub fn validate(&self) -> io::Result<()> {
        if self.atomic_block_size == 0 || self.atomic_block_size % BLK_SIZE as u64 != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("atomic block size must be a positive multiple of {BLK_SIZE}"),
            ));
        }
        if self.atomic_block_size > MAX_ATOMIC_BLOCK_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("atomic block size must not exceed {MAX_ATOMIC_BLOCK_SIZE} bytes"),
            ));
        }
        if self.random_size_bytes > MAX_RANDOM_SIZE_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("random pad size must not exceed {MAX_RANDOM_SIZE_BYTES} bytes"),
            ));
        }
        Ok(())
    }
}

/// Summary of one encoding run, mirroring the populated [`Footer`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EncodeReport {
    pub read: u64,
    pub written: u64,
    pub ratio: f64,
    pub atomic_blocks: u64,
}

/// A small deterministic generator for the per-block discardable random
/// pad. Spec §4.1: "need not be cryptographically strong" — splitmix64 is
/// enough to defeat naive downstream compressors without pulling in a
/// dependency this crate has no other use for.
struct RandomPad {
    state: u64,
}

impl RandomPad {
    fn new() -> Self {
        RandomPad {
            state: 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn fill(&mut self, buf: &mut [u8]) {
        let mut chunks = buf.chunks_exact_mut(WORD_SIZE);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next_u64().to_le_bytes());
        }
        let rem = chunks.into_remainder();
        if !rem.is_empty() {
            let bytes = self.next_u64().to_le_bytes();
            rem.copy_from_slice(&bytes[..rem.len()]);
        }
    }
}

/// Reads up to `buf.len()` bytes, looping until the buffer is full or the
/// source is exhausted (a single [`Read::read`] call may return short of a
/// full sector without being at EOF).
fn fill_sector<R: Read>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Writes one atomic block and resets the per-block state for the next
/// one. Returns the number of bytes written to `dst`.
///
/// If `mode_copy` is true, the currently-open data run is closed by
/// pushing `relative_offset` as its length before the block is emitted —
/// the `meta_idx % 2 != 0` case in `sfsz.c`'s `flush_block`. The fresh
/// boundary vector for the next block always resets to `vec![0]`
/// unconditionally (matching `data_boundaries[0] = 0` being set once,
/// globally, before `sfsz.c`'s read loop even starts, and never touched
/// again), with the mode primed back to "copy, nothing accumulated yet" —
/// every block, including the first, begins from the same state.
#[allow(clippy::too_many_arguments)]
fn flush_block<W: Write>(
    dst: &mut W,
    payload: &mut Vec<u8>,
    boundaries: &mut Vec<u64>,
    relative_offset: &mut u64,
    mode_copy: bool,
    random_size_bytes: u64,
    rand_pad: &mut RandomPad,
) -> io::Result<u64> {
    if mode_copy {
        boundaries.push(*relative_offset);
    }

    let payload_size = payload.len() as u64;
    let mut written = 0u64;

    dst.write_all(&payload_size.to_le_bytes())?;
    written += WORD_SIZE as u64;

    if random_size_bytes > 0 {
        let mut pad = vec![0u8; random_size_bytes as usize];
        rand_pad.fill(&mut pad);
        dst.write_all(&pad)?;
        written += random_size_bytes;
    }

    dst.write_all(payload)?;
    written += payload_size;

    let boundary_count = boundaries.len() as u64;
    dst.write_all(&boundary_count.to_le_bytes())?;
    written += WORD_SIZE as u64;
    for b in boundaries.iter() {
        dst.write_all(&b.to_le_bytes())?;
        written += WORD_SIZE as u64;
    }

    payload.clear();
    boundaries.clear();
    boundaries.push(0);
    *relative_offset = 0;

    Ok(written)
}

/// Encodes `src` into the wire format described in spec §6, writing to
/// `dst`. Returns a summary equal to the footer just written.
pub fn encode<R: Read, W: Write>(
    src: &mut R,
    dst: &mut W,
    config: &EncoderConfig,
) -> io::Result<EncodeReport> {
    config.validate()?;

    dst.write_all(&config.random_size_bytes.to_le_bytes())?;
    let mut written = WORD_SIZE as u64;

    let mut payload: Vec<u8> = Vec::with_capacity(config.atomic_block_size as usize);
    // boundaries[0] is always 0 — see this module's doc comment.
    let mut boundaries: Vec<u64> = vec![0];
    // We start assuming the beginning of the file is not sparse (`sfsz.c`'s
    // `sparse_on = 0`), i.e. a zero-length copy run is already open.
    let mut mode_copy = true;
    let mut relative_offset: u64 = 0;
    let mut bytes_since_flush: u64 = 0;
    let mut read_total: u64 = 0;
    let mut atomic_blocks: u64 = 0;
    let mut rand_pad = RandomPad::new();
    let mut sector = vec![0u8; BLK_SIZE];

    loop {
        let n = fill_sector(src, &mut sector)?;
        if n == 0 {
            break;
        }
        read_total += n as u64;
        bytes_since_flush += n as u64;

        let short_read = n < BLK_SIZE;
        let keepalive_due =
            config.read_keepalive_bytes > 0 && bytes_since_flush >= config.read_keepalive_bytes;
        let force_flush = short_read || keepalive_due;
        let is_copy = force_flush || sector[..n].iter().any(|&b| b != 0);

        if is_copy != mode_copy {
            boundaries.push(relative_offset);
            relative_offset = 0;
            mode_copy = is_copy;
        }
        relative_offset += n as u64;
        if is_copy {
            payload.extend_from_slice(&sector[..n]);
        }

        if force_flush || payload.len() as u64 >= config.atomic_block_size {
            written += flush_block(
                dst,
                &mut payload,
                &mut boundaries,
                &mut relative_offset,
                mode_copy,
                config.random_size_bytes,
                &mut rand_pad,
            )?;
            atomic_blocks += 1;
            bytes_since_flush = 0;
        }
    }

    // `sfsz.c` only flushes a final trailing block when `buf_offset > 0`
    // (there is payload data pending); `boundaries` always holds at least
    // the `[0]` placeholder, so it can't be used as the trigger.
    if !payload.is_empty() {
        written += flush_block(
            dst,
            &mut payload,
            &mut boundaries,
            &mut relative_offset,
            mode_copy,
            config.random_size_bytes,
            &mut rand_pad,
        )?;
        atomic_blocks += 1;
    }

    dst.write_all(&SENTINEL.to_le_bytes())?;
    written += WORD_SIZE as u64;
    written += FOOTER_SIZE as u64;

    let footer = Footer {
        read: read_total,
        written,
        ratio: if read_total > 0 {
            written as f64 / read_total as f64
        } else {
            0.0
        },
        atomic_blocks,
    };
    footer.write_to(dst)?;

    Ok(EncodeReport {
        read: footer.read,
        written: footer.written,
        ratio: footer.ratio,
        atomic_blocks: footer.atomic_blocks,
    })
}
