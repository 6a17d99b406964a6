//! Reference corpus loading.
//!
//! The corpus is a directory of plain-text rubric files. All `.txt` files
//! are read and concatenated with a blank-line separator into one blob for
//! the chunker. Directory listing order is not meaningful for retrieval, but
//! files are read in sorted name order so chunk indices are stable across
//! platforms.

use crate::error::{MiPracticeError, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Read every `.txt` file directly under `dir` into one corpus blob.
///
/// An existing but empty directory is a valid empty corpus and returns an
/// empty string. A missing path or a non-directory is an error.
pub fn load_corpus(dir: &Path) -> Result<String> {
    if !dir.is_dir() {
        return Err(MiPracticeError::InvalidCorpusPath(dir.to_path_buf()));
    }

    let mut texts = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let io_err = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("walkdir error"));
            MiPracticeError::io(dir, io_err)
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| MiPracticeError::io(path, e))?;
        texts.push(content);
    }

    Ok(texts.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_directory_is_an_error() {
        let result = load_corpus(Path::new("/nonexistent/rubrics"));
        assert!(matches!(result, Err(MiPracticeError::InvalidCorpusPath(_))));
    }

    #[test]
    fn test_empty_directory_is_an_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = load_corpus(dir.path()).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_concatenates_txt_files_with_blank_line() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "first rubric").unwrap();
        fs::write(dir.path().join("b.txt"), "second rubric").unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert_eq!(corpus, "first rubric\n\nsecond rubric");
    }

    #[test]
    fn test_ignores_non_txt_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rubric.txt"), "keep me").unwrap();
        fs::write(dir.path().join("notes.md"), "skip me").unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert_eq!(corpus, "keep me");
    }
}
