use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

use sfs::cli::{resolve_display_level, SfszArgs};
use sfs::codec::encoder::{encode, EncoderConfig};
use sfs::display::set_display_level;
use sfs::io::file_io::{open_dst_for_encode, open_src};
use sfs::timefn::{clock_span_ns, get_time};

fn main() -> ExitCode {
    let args = SfszArgs::parse();
    set_display_level(resolve_display_level(args.verbose, args.quiet));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sfsz: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &SfszArgs) -> anyhow::Result<()> {
    let config = EncoderConfig::new(args.block_size, args.keepalive, args.random_size);
    config.validate()?;

    let mut src = open_src(&args.src_path)?;
    let mut dst = open_dst_for_encode(&args.dst_path)?;

    let time_start = get_time();
    let report = encode(&mut src, &mut dst, &config)?;
    dst.flush()?;
    let seconds = clock_span_ns(time_start).max(1) as f64 / 1_000_000_000.0;
    let mib_per_s = (report.read as f64 / 1024.0 / 1024.0) / seconds;

    sfs::displaylevel!(
        3,
        "done in {:.2} s ==> {:.2} MiB/s: read={} written={} ratio={:.5} atomic_blocks={}",
        seconds,
        mib_per_s,
        report.read,
        report.written,
        report.ratio,
        report.atomic_blocks
    );
    Ok(())
}
