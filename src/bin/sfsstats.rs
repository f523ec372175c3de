use std::process::ExitCode;

use clap::Parser;

use sfs::cli::SfsstatsArgs;
use sfs::stats::read_stats;

fn main() -> ExitCode {
    let args = SfsstatsArgs::parse();
    match read_stats(&args.filename) {
        Ok(footer) => {
            println!(
                "read={}, written={}, ratio={:.5}, atomic_blocks={}",
                footer.read, footer.written, footer.ratio, footer.atomic_blocks
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("sfsstats: {}: {e}", args.filename);
            ExitCode::FAILURE
        }
    }
}
