// File: crates/graph-cli/src/lib.rs
// Summary: Library half of the `graphplot` binary: flags, run loop, data exporters, logger setup.

pub mod cli;
pub mod export;

pub use cli::{run, Cli};
pub use export::{CsvExporter, JsonExporter};

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

/// Install the terminal logger. A logger that is already set is left in place.
pub fn init_logging(level: LevelFilter) {
    let installed = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
    if installed.is_err() {
        log::debug!("logger already initialized");
    }
}
