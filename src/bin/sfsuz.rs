use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use sfs::cli::{resolve_display_level, SfsuzArgs};
use sfs::codec::decoder::decode;
use sfs::display::set_display_level;
use sfs::io::file_io::{open_dst_for_decode, open_src};
use sfs::resources::ResourceScope;
use sfs::timefn::{clock_span_ns, get_time};

fn main() -> ExitCode {
    let args = SfsuzArgs::parse();
    set_display_level(resolve_display_level(args.verbose, args.quiet));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sfsuz: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &SfsuzArgs) -> anyhow::Result<()> {
    let mut src = open_src(&args.src_path)?;
    let mut dst = open_dst_for_decode(&args.dst_path)?;

    // Guarantee the destination is flushed to disk on every exit path,
    // including a format error partway through — the partially
    // reconstructed file is left as-is with a diagnostic, per spec, not
    // silently dropped before it hits storage.
    let mut scope = ResourceScope::new();
    let sync_handle = dst.try_clone()?;
    scope.defer(move || sync_handle.sync_all());

    let time_start = get_time();
    let decode_result = decode(&mut src, &mut dst);
    scope.release()?;
    let report = decode_result?;
    let seconds = clock_span_ns(time_start).max(1) as f64 / 1_000_000_000.0;
    let mib_per_s = (report.written as f64 / 1024.0 / 1024.0) / seconds;

    sfs::displaylevel!(
        3,
        "done in {:.2} s ==> {:.2} MiB/s: read={} written={} atomic_blocks={}",
        seconds,
        mib_per_s,
        report.read,
        report.written,
        report.atomic_blocks
    );
    Ok(())
}
