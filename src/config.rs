// config.rs — Compile-time and default-value constants for the sparse-file codec.
// Migrated from sfs.h and the literal constants scattered through sfsz.c / sfsuz.c
// (ovh/sparse-file-stripper).

/// Minimum contiguous run of zero bytes that switches the encoder into sparse
/// mode; also the decoder's read/zero-detection granularity.
/// Corresponds to `BLK_SIZE` in sfs.h.
pub const BLK_SIZE: usize = 4096;

/// Sentinel `payload_size` value marking the end of the atomic-block stream
/// and the start of the footer. Corresponds to the C source's `(size_t) -1`
/// written after the last real block (sfsz.c: `buf_offset = -1L`).
pub const SENTINEL: u64 = u64::MAX;

/// Default atomic block (payload) size: 256 MiB.
/// Corresponds to `atomic_block_size = 268435456` in sfsz.c.
pub const DEFAULT_ATOMIC_BLOCK_SIZE: u64 = 256 * (1 << 20);

/// Upper bound on the configurable atomic block size: 4 GiB.
/// Corresponds to the `atomic_block_size > 4294967296` check in sfsz.c.
pub const MAX_ATOMIC_BLOCK_SIZE: u64 = 4 * (1 << 30);

/// Upper bound on a single atomic block's declared `payload_size` as
/// enforced by the decoder. Same numeric bound as [`MAX_ATOMIC_BLOCK_SIZE`];
/// kept as a separate constant because it documents a decoder-side
/// invariant (sfsuz.c: `current_atomic_block_size > 4294967296`) rather
/// than an encoder-side configuration ceiling.
pub const MAX_PAYLOAD_SIZE: u64 = MAX_ATOMIC_BLOCK_SIZE;

/// Upper bound on the per-block random discard pad: 10 MiB.
/// Corresponds to `MAX_RANDOM_BUFFER_SIZE` in sfsz.c.
pub const MAX_RANDOM_SIZE_BYTES: u64 = 10 * (1 << 20);

/// Chunk size used when heavy-zeroing (writing literal zero bytes) in place
/// of a hole punch, either because the filesystem doesn't support punching
/// or as a fallback after punch failure. Corresponds to `BUF_SIZE` in
/// sfsuz.c.
pub const ZERO_CHUNK_SIZE: usize = 256 * (1 << 20);

/// Width, in bytes, of the little-endian `u64` integers that make up the
/// wire format (`payload_size`, `boundary_count`, boundary entries, the
/// stream header, the sentinel, and three of the footer's four fields).
pub const WORD_SIZE: usize = std::mem::size_of::<u64>();
