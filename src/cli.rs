//! Command-line argument definitions, one [`clap::Parser`] struct per
//! binary.
//!
//! Spec treats CLI parsing as an external collaborator out of scope for the
//! core engine, but the ambient stack still needs one: the teacher crate's
//! `Cargo.toml` already depends on `clap`, and this format's surface is
//! small enough that a derive struct is the idiomatic choice over hand-
//! rolling a getopt loop the way `sfsz.c`/`sfsuz.c` do.

use clap::Parser;

/// Strip long zero runs out of a byte stream, recording their layout in a
/// boundary vector so the original can be reconstructed exactly.
#[derive(Parser, Debug)]
#[command(name = "sfsz", version, about)]
pub struct SfszArgs {
    /// Source path, or "-" for standard input.
    pub src_path: String,

    /// Destination path, or "-" for standard output.
    pub dst_path: String,

    /// Target payload size per atomic block, in bytes.
    #[arg(short = 'b', long = "block-size", default_value_t = crate::config::DEFAULT_ATOMIC_BLOCK_SIZE)]
    pub block_size: u64,

    /// Force a block flush after this many input bytes without one, even
    /// mid sparse-run. 0 disables.
    #[arg(short = 'k', long = "keepalive", default_value_t = 0)]
    pub keepalive: u64,

    /// Per-block discardable random pad size, in bytes (capped at 10 MiB).
    #[arg(short = 'r', long = "random-size", default_value_t = 0)]
    pub random_size: u64,

    /// Increase verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-fatal diagnostics.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

/// Reconstruct a byte stream encoded by `sfsz`, restoring zero runs as
/// filesystem holes where supported.
#[derive(Parser, Debug)]
#[command(name = "sfsuz", version, about)]
pub struct SfsuzArgs {
    /// Source path, or "-" for standard input.
    pub src_path: String,

    /// Destination path. Must be a real seekable path — "-" (stdout) is
    /// rejected.
    pub dst_path: String,

    /// Increase verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-fatal diagnostics.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

/// Print the trailing summary record of an encoded stream.
#[derive(Parser, Debug)]
#[command(name = "sfsstats", version, about)]
pub struct SfsstatsArgs {
    /// Path to an encoded stream.
    pub filename: String,
}

/// Resolves `-v`/`-q` flags into the shared [`crate::display`] verbosity
/// level: `--quiet` wins outright; otherwise each `-v` adds one level above
/// the default of 2.
pub fn resolve_display_level(verbose: u8, quiet: bool) -> u32 {
    if quiet {
        0
    } else {
        2 + verbose as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(resolve_display_level(3, true), 0);
    }

    #[test]
    fn verbose_adds_above_default() {
        assert_eq!(resolve_display_level(0, false), 2);
        assert_eq!(resolve_display_level(2, false), 4);
    }
}
