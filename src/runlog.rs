use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Default run log location, relative to the working directory.
pub const LOG_FILE: &str = "backsync.log";

/// Append-only record of what a run did: every command line and every fatal
/// failure, one line per event:
///
/// ```text
/// 2020-05-01 09:30:12 INFO: rsync -av /cygdrive/c/Users/me /cygdrive/e/backup
/// ```
///
/// Writes are best-effort. A broken log must not mask the event being
/// reported, so failures are warned about and otherwise swallowed.
pub struct RunLog {
    file: Option<File>,
}

impl RunLog {
    pub fn open(path: &Path) -> RunLog {
        let file = OpenOptions::new().create(true).append(true).open(path);
        if let Err(ref err) = file {
            warn!("Unable to open run log {:?}: {}", path, err);
        }

        RunLog { file: file.ok() }
    }

    pub fn info(&mut self, message: &str) {
        self.write("INFO", message);
    }

    pub fn error(&mut self, message: &str) {
        self.write("ERROR", message);
    }

    fn write(&mut self, level: &str, message: &str) {
        if let Some(ref mut file) = self.file {
            let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            if let Err(err) = writeln!(file, "{} {}: {}", stamp, level, message) {
                warn!("Unable to write to run log: {}", err);
            }
        }
    }
}
