//! Client output log.
//!
//! One line per distinct value received. The file is truncated when the
//! log is created and again on every purge.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Destination for received values.
pub trait OutputLog {
    /// Append `line` plus a newline and flush.
    fn append_line(&mut self, line: &str) -> io::Result<()>;

    /// Discard everything written so far.
    fn purge(&mut self) -> io::Result<()>;
}

pub struct FileOutputLog {
    path: PathBuf,
    file: File,
}

impl FileOutputLog {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = File::create(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputLog for FileOutputLog {
    fn append_line(&mut self, line: &str) -> io::Result<()> {
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.file.flush()
    }

    /// Reopen with truncation. On failure the previous handle stays in use.
    fn purge(&mut self) -> io::Result<()> {
        self.file = File::create(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rotary-relay-{}-{}", std::process::id(), name))
    }

    #[test]
    fn create_truncates_existing_content() {
        let path = scratch("create");
        std::fs::write(&path, "stale\n").unwrap();
        let log = FileOutputLog::create(&path).unwrap();
        assert_eq!(log.path(), path.as_path());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn append_then_purge() {
        let path = scratch("purge");
        let mut log = FileOutputLog::create(&path).unwrap();
        log.append_line("1;0").unwrap();
        log.append_line("2;0").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1;0\n2;0\n");

        log.purge().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        log.append_line("3;1").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "3;1\n");
        let _ = std::fs::remove_file(&path);
    }
}
