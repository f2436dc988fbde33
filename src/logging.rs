#![cfg(feature = "std")]

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

use log::{LevelFilter, Metadata, Record};

/// Environment variable holding the log level (`error` .. `trace`).
pub const LOG_LEVEL_ENV: &str = "BROADSIDE_LOG";
/// Environment variable naming a file to append log records to.
pub const LOG_FILE_ENV: &str = "BROADSIDE_LOG_FILE";

struct SimpleLogger {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{} {} - {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

fn parse_level(value: Option<String>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn open_sink(path: Option<String>) -> Box<dyn Write + Send> {
    match path {
        Some(path) => match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("cannot open log file {}: {}", path, e);
                Box::new(io::stderr())
            }
        },
        None => Box::new(io::stderr()),
    }
}

/// Install the logger. The level comes from `BROADSIDE_LOG` (default
/// `info`); records go to stderr, or to the file named by
/// `BROADSIDE_LOG_FILE`. Calling this twice keeps the first logger.
pub fn init_logging() {
    let level = parse_level(env::var(LOG_LEVEL_ENV).ok());
    let logger = SimpleLogger {
        sink: Mutex::new(open_sink(env::var(LOG_FILE_ENV).ok())),
    };
    let _ = log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(level));
}
