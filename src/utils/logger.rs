use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Level for minfind's own records: per-file scan results and improvements are debug.
fn level_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn level_tag(level: Level) -> Option<ColoredString> {
    match level {
        Level::Error => Some("ERROR".red()),
        Level::Warn => Some("WARN".yellow()),
        _ => None,
    }
}

/// Install the stderr logger. Warnings and errors carry the emitting module so a failed scan can
/// be told apart from a failed write. Rayon and other dependencies stay at Warn.
/// Safe to call more than once; later calls are ignored.
pub fn setup_logging(verbose: bool) {
    let name = env!("CARGO_PKG_NAME");
    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(name, level_filter(verbose))
        .format(move |buf, record| match level_tag(record.level()) {
            Some(tag) => writeln!(
                buf,
                "[{} {} {}] {}",
                name.cyan(),
                tag,
                record.target().white(),
                record.args()
            ),
            None => writeln!(buf, "[{}] {}", name.cyan(), record.args()),
        })
        .try_init();
}
