//! Log reader

use ldlog_core::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the current contents of a log file as display lines
pub struct LogReader {
    path: PathBuf,
}

impl LogReader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read all non-blank lines in file order.
    ///
    /// A missing or unreadable file yields no lines. Reads are not locked, so
    /// a concurrent append may show up as a partial last line.
    pub fn read_lines(&self) -> Vec<String> {
        match self.try_read_lines() {
            Ok(lines) => lines,
            Err(e) => {
                debug!("Failed to read {}: {}", self.path.display(), e);
                vec![]
            }
        }
    }

    fn try_read_lines(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let bytes = fs::read(&self.path)?;
        let content = String::from_utf8_lossy(&bytes);

        Ok(content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Check if the log file exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get file size, zero when missing
    pub fn size(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_read_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.log");
        File::create(&path).unwrap();

        let reader = LogReader::new(path);
        assert!(reader.read_lines().is_empty());
        assert!(reader.exists());
    }

    #[test]
    fn test_read_nonexistent_file() {
        let reader = LogReader::new(PathBuf::from("/nonexistent/path.log"));
        assert!(reader.read_lines().is_empty());
        assert!(!reader.exists());
        assert_eq!(reader.size(), 0);
    }

    #[test]
    fn test_read_directory_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let reader = LogReader::new(dir.path().to_path_buf());
        assert!(reader.read_lines().is_empty());
        assert!(!reader.exists());
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.log");
        fs::write(&path, "a\n\n  \nb\n").unwrap();

        let reader = LogReader::new(path);
        assert_eq!(reader.read_lines(), vec!["a", "b"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.log");
        let content = "[06-Aug-2025 06:30:45 UTC] Line 1\n\n[07-Aug-2025 07:30:45 UTC] Line 2\n   \n[08-Aug-2025 08:30:45 UTC] Line 3\n";
        fs::write(&path, content).unwrap();

        let lines = LogReader::new(path).read_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "[06-Aug-2025 06:30:45 UTC] Line 1");
        assert_eq!(lines[1], "[07-Aug-2025 07:30:45 UTC] Line 2");
        assert_eq!(lines[2], "[08-Aug-2025 08:30:45 UTC] Line 3");
    }

    #[test]
    fn test_crlf_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.log");
        fs::write(&path, "first\r\n\r\nsecond\r\n").unwrap();

        assert_eq!(LogReader::new(path).read_lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.log");

        {
            let mut file = File::create(&path).unwrap();
            file.write_all(b"Hello, world!\n").unwrap();
        }

        let reader = LogReader::new(path);
        assert_eq!(reader.size(), 14);
    }
}
