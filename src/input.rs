//! Reading diff or markdown text from a file or stdin.

use std::io::Read;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::InputSource;

/// Errors reading command input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {source_name}: {source}")]
    Read {
        source_name: String,
        source: std::io::Error,
    },
}

/// Read the whole input as UTF-8 text.
///
/// Invalid UTF-8 is replaced rather than rejected, since diffs of
/// binary-ish files are common and the engine treats them as text.
pub fn read_input(source: &InputSource) -> Result<String, InputError> {
    let bytes = match source {
        InputSource::File(path) => {
            if !path.exists() {
                return Err(InputError::NotFound(path.clone()));
            }
            std::fs::read(path).map_err(|e| InputError::Read {
                source_name: path.display().to_string(),
                source: e,
            })?
        }
        InputSource::Stdin => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| InputError::Read {
                    source_name: "stdin".to_string(),
                    source: e,
                })?;
            buf
        }
    };

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("change.diff");
        std::fs::write(&path, "diff --git a/x b/x\n").unwrap();

        let text = read_input(&InputSource::File(path)).unwrap();
        assert_eq!(text, "diff --git a/x b/x\n");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.md");
        let err = read_input(&InputSource::File(path)).unwrap_err();
        assert!(matches!(err, InputError::NotFound(_)));
        assert!(err.to_string().contains("absent.md"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.diff");
        std::fs::write(&path, [b'a', 0xff, b'b']).unwrap();

        let text = read_input(&InputSource::File(path)).unwrap();
        assert_eq!(text, "a\u{fffd}b");
    }
}
