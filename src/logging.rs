use console::style;
use log::{Level, LevelFilter, Log, Metadata, Record};

pub const LOG_ENV: &str = "LOCVIZ_LOG";

/// Writes log lines to stderr so stdout stays clean for JSON output.
struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => style("error").red().bold(),
            Level::Warn => style("warn").yellow().bold(),
            Level::Info => style("info").green(),
            Level::Debug => style("debug").cyan(),
            Level::Trace => style("trace").dim(),
        };
        eprintln!("{tag}: {}", record.args());
    }

    fn flush(&self) {}
}

/// Level from `-v` count and `--quiet`, unless `LOCVIZ_LOG` names one.
pub fn level_for(verbose: u8, quiet: bool, env: Option<&str>) -> LevelFilter {
    if let Some(level) = env.and_then(|v| v.trim().parse::<LevelFilter>().ok()) {
        return level;
    }
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger. Calling it twice keeps the first logger.
pub fn init(verbose: u8, quiet: bool) {
    let env = std::env::var(LOG_ENV).ok();
    let level = level_for(verbose, quiet, env.as_deref());
    if log::set_boxed_logger(Box::new(StderrLogger { level })).is_ok() {
        log::set_max_level(level);
    }
}

/// Turns logging off until dropped, then puts the previous level back.
/// Held while the terminal UI owns the screen.
pub struct Silenced {
    previous: LevelFilter,
}

pub fn silence() -> Silenced {
    let previous = log::max_level();
    log::set_max_level(LevelFilter::Off);
    Silenced { previous }
}

impl Drop for Silenced {
    fn drop(&mut self) {
        log::set_max_level(self.previous);
    }
}
