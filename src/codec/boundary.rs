//! Boundary-vector bounds shared between the encoder (which grows the
//! vector defensively) and the decoder (which validates it on the way in).
//!
//! Corresponds to the `2 * (atomic_block_size/4096 + 1)` sizing used for the
//! initial allocation in `sfsz.c` and the identical expression `sfsuz.c`
//! checks `current_meta_max_idx` against.

use crate::config::BLK_SIZE;

/// Upper bound on `boundary_count` for a block whose payload is
/// `payload_size` bytes: `2 * (payload_size / BLK_SIZE + 1)`.
pub fn max_boundary_count(payload_size: u64) -> u64 {
    2 * (payload_size / BLK_SIZE as u64 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_grows_with_payload_size() {
        assert_eq!(max_boundary_count(0), 2);
        assert_eq!(max_boundary_count(4096), 4);
        assert_eq!(max_boundary_count(8192), 6);
    }

    #[test]
    fn bound_floors_partial_sectors() {
        assert_eq!(max_boundary_count(4097), 4);
        assert_eq!(max_boundary_count(8191), 4);
    }
}
