//! Archiving of processed upload files
//!
//! A file is moved to the archive unconditionally once its rows have been
//! processed, however many of them failed. Rename is attempted first; when
//! the archive directory sits on another filesystem the move falls back to
//! copy-and-remove.

use gbl_common::Result;
use std::path::Path;
use tracing::info;

/// Move a processed file from the intake directory to the archive.
pub fn archive_file(source: &Path, dest: &Path) -> Result<()> {
    match std::fs::rename(source, dest) {
        Ok(()) => {},
        Err(_) => {
            std::fs::copy(source, dest)?;
            std::fs::remove_file(source)?;
        },
    }

    info!(from = %source.display(), to = %dest.display(), "Archived file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let upload = dir.path().join("Upload");
        let archive = dir.path().join("Archive");
        std::fs::create_dir_all(&upload).unwrap();
        std::fs::create_dir_all(&archive).unwrap();

        let source = upload.join("dmf_test.csv");
        std::fs::write(&source, "a,b\n1,2\n").unwrap();

        archive_file(&source, &archive.join("dmf_test.csv")).unwrap();

        assert!(!source.exists());
        assert_eq!(
            std::fs::read_to_string(archive.join("dmf_test.csv")).unwrap(),
            "a,b\n1,2\n"
        );
    }

    #[test]
    fn test_archive_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = archive_file(&dir.path().join("absent.csv"), &dir.path().join("out.csv"));
        assert!(result.is_err());
    }
}
