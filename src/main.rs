//! minfind CLI: `minfind <OUTPUT> <INPUT>...`. Always exits 0; problems are reported on stderr.

use clap::Parser;
use minfind::engine::arg_parser::Cli;
use minfind::engine::handle_run;
use std::time::Instant;

fn main() {
    let start_time = Instant::now();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage, --help and --version all land here; none of them is a failed run.
            let _ = e.print();
            return;
        }
    };
    if let Err(e) = handle_run(&cli) {
        log::error!("{:#}", e);
    }
    log::debug!("Total time: {:?}", start_time.elapsed());
}
