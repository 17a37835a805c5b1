//! CLI command handler: layer settings, run the finder, report the outcome.

use anyhow::Result;
use log::{debug, info, warn};
use std::path::Path;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::engine::tools::format_min;
use crate::pipeline::find_min_with_opts;
use crate::utils::minfind_toml::{apply_file_to_opts, load_minfind_toml};
use crate::utils::setup_logging;

/// Defaults, then `.minfind.toml` in the working directory, then CLI flags. Sets up logging.
fn setup_opts(cli: &Cli) -> Opts {
    let mut opts = Opts::default();
    let file = load_minfind_toml(Path::new("."));
    if let Ok(Some(f)) = &file {
        apply_file_to_opts(f, &mut opts);
    }
    if let Some(n) = cli.max_workers {
        opts.max_workers = Some(n);
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    if let Some(p) = cli.progress {
        opts.progress = p;
    }
    setup_logging(opts.verbose);
    if let Err(e) = file {
        warn!("Ignoring settings file: {:#}", e);
    }
    opts
}

/// Scan `cli.inputs` and keep `cli.output` holding the lowest value seen.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli);
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);
    debug!("Scanning {} input file(s)...", cli.inputs.len());
    let (min, tally) = find_min_with_opts(&cli.inputs, &cli.output, &opts)?;
    match min {
        Some(min) if tally.output_current => info!(
            "Global minimum {} written to {}",
            format_min(min),
            cli.output.display()
        ),
        Some(min) => warn!(
            "Global minimum is {} but {} does not hold it ({} failed write(s))",
            format_min(min),
            cli.output.display(),
            tally.unpersisted
        ),
        None => warn!(
            "No input could be read; {} was not written",
            cli.output.display()
        ),
    }
    Ok(())
}
