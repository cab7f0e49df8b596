//! Application log pipeline.
//!
//! Backs the `log` facade with a crossbeam channel and a background writer
//! thread, so logging never blocks the UI loop. Lines are appended to a
//! per-launch file under the config directory. This is app diagnostics
//! only; the console transcript is process output and never routes here.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use crossbeam_channel::{unbounded, Sender};
use log::{Level, Log, Metadata, Record};

use crate::error::ConfigError;

/// Get the log directory: `<config dir>/logs`
pub fn log_dir() -> Result<PathBuf, ConfigError> {
    Ok(crate::config::config_dir()?.join("logs"))
}

#[derive(Clone)]
pub struct AppLog {
    tx: Sender<String>,
}

impl AppLog {
    /// Create the log file for this launch and spawn the writer thread.
    pub fn init() -> Result<AppLog, ConfigError> {
        let dir = log_dir()?;
        std::fs::create_dir_all(&dir).map_err(ConfigError::IoError)?;
        let path = dir.join(format!("{}.log", Local::now().format("%Y%m%d_%H%M%S")));
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(ConfigError::IoError)?;

        let (tx, rx) = unbounded::<String>();

        // Blocking recv on a plain OS thread; works from any runtime.
        std::thread::spawn(move || {
            while let Ok(line) = rx.recv() {
                let _ = writeln!(file, "{}", line);
                let _ = file.flush();
            }
        });

        Ok(AppLog { tx })
    }

    /// Register this instance as the global logger for the `log` crate.
    pub fn install(self, max_level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self)).map(|()| log::set_max_level(max_level))
    }
}

impl Log for AppLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = format!(
                "[{}] [{}] {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            );
            let _ = self.tx.send(line);
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_line_delivery_is_non_blocking() {
        let (tx, rx) = unbounded::<String>();
        let applog = AppLog { tx };
        for i in 0..1000 {
            applog
                .log(&Record::builder().args(format_args!("line {}", i)).build());
        }
        // All lines accepted without blocking; the channel holds them.
        assert_eq!(rx.len(), 1000);
    }
}
