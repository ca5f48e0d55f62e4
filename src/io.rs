use std::fs;
use std::path::Path;

use crate::{AlignerError, Result};

/// Reads a whole file as one sequence.
///
/// Bytes are taken verbatim: a trailing newline is an alignment symbol
/// like any other.
pub fn read_sequence(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| AlignerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_trailing_newline() {
        let path = std::env::temp_dir().join(format!("wavefront_seq_{}.txt", std::process::id()));
        fs::write(&path, b"ACGT\n").unwrap();
        let seq = read_sequence(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(seq, b"ACGT\n");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_sequence("/nonexistent/dir/query.txt").unwrap_err();
        assert!(matches!(err, AlignerError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/dir/query.txt"));
    }
}
