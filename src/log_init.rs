use log::{LevelFilter, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{HostError, Result};

struct FileLogger {
    file_path: PathBuf,
    level: LevelFilter,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)
            {
                let _ = writeln!(
                    file,
                    "[{}] {}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {}
}

/// Sends resolver diagnostics (malformed shorthands, pipeline steps,
/// extension writes) to the file at `path`.
///
/// Creates the file up front; an unwritable path is an error.
pub fn init_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<()> {
    let file_path = path.as_ref().to_path_buf();
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&file_path)?;

    let logger = FileLogger { file_path, level };
    log::set_boxed_logger(Box::new(logger)).map_err(|_| HostError::LoggerAlreadySet)?;
    log::set_max_level(level);
    Ok(())
}
