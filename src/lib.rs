//! Sparse-file-aware stream codec: strips long zero runs out of a byte
//! stream on encode, and restores them as filesystem holes (where
//! supported) on decode.
//!
//! Three binaries share this crate's format definitions, encoder/decoder
//! engines, and I/O helpers: `sfsz` (compressor), `sfsuz` (decompressor),
//! `sfsstats` (footer reader) — the same one-library/many-binaries layout
//! the teacher crate uses for its own `lz4`/`unlz4`/`lz4cat` family.

pub mod cli;
pub mod codec;
pub mod config;
pub mod display;
pub mod footer;
pub mod io;
pub mod resources;
pub mod sparse;
pub mod stats;
pub mod timefn;
