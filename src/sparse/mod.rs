//! Destination-side sparse write support for the decoder.
//!
//! See [`punch::PunchStrategy`] for the hole-punch-with-fallback primitive
//! that does the actual work.

pub mod punch;

pub use punch::PunchStrategy;
