//! Utility functions for Herbarium.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{HerbariumError, Result};

/// Maximum size of a script, help, or config file read into memory (1 MB).
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Read a file into a string, refusing files larger than `MAX_FILE_SIZE`.
pub fn read_to_string_limited(path: &Path) -> Result<String> {
    read_to_string_with_limit(path, MAX_FILE_SIZE)
}

/// Read a file into a string with a custom size limit.
///
/// # Errors
///
/// Returns a storage error if the file cannot be read or is larger than
/// `max_size` bytes.
pub fn read_to_string_with_limit(path: &Path, max_size: u64) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| HerbariumError::storage(path, e))?;

    let size = metadata.len();
    if size > max_size {
        return Err(HerbariumError::storage(
            path,
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("file is too large ({} bytes, max {} bytes)", size, max_size),
            ),
        ));
    }

    fs::read_to_string(path).map_err(|e| HerbariumError::storage(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_read_to_string_limited_success() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plants.txt");
        fs::write(&path, "ADD tree, Oak, 5\nPRINT\n").unwrap();

        let content = read_to_string_limited(&path).unwrap();
        assert_eq!(content, "ADD tree, Oak, 5\nPRINT\n");
    }

    #[test]
    fn test_read_to_string_limited_nonexistent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.txt");

        let err = read_to_string_limited(&path).unwrap_err();
        assert!(matches!(err, HerbariumError::Storage { .. }));
        assert!(err.to_string().contains("nonexistent.txt"));
    }

    #[test]
    fn test_read_to_string_with_limit_exceeds() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("large.txt");

        let mut file = fs::File::create(&path).unwrap();
        file.write_all(&[b'x'; 1000]).unwrap();

        let err = read_to_string_with_limit(&path, 500).unwrap_err().to_string();
        assert!(err.contains("too large"));
        assert!(err.contains("1000 bytes"));
        assert!(err.contains("max 500 bytes"));
    }

    #[test]
    fn test_read_to_string_limited_at_boundary() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("boundary.txt");
        fs::write(&path, "x".repeat(100)).unwrap();

        assert!(read_to_string_with_limit(&path, 100).is_ok());
        assert!(read_to_string_with_limit(&path, 99).is_err());
    }
}
