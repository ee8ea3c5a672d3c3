//! Locating input files in a directory.

use std::fs;
use std::path::Path;

use crate::{SourceId, SourceReadError};

const SOURCE_SUFFIX: &str = ".csv";

/// List up to `limit` `.csv` files in `dir`, ordered by file name.
pub fn discover_sources(dir: &Path, limit: usize) -> Result<Vec<SourceId>, SourceReadError> {
    let io_error = |source: std::io::Error| SourceReadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let is_source = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(SOURCE_SUFFIX));
        if is_source && path.is_file() {
            paths.push(path);
        }
    }

    paths.sort();
    paths.truncate(limit);
    Ok(paths.into_iter().map(SourceId::from_path).collect())
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn lists_csv_files_sorted_and_limited() {
        let dir = tempdir().expect("tempdir");
        for name in ["b.csv", "a.csv", "c.csv", "notes.txt", "d.CSV"] {
            File::create(dir.path().join(name)).expect("create");
        }
        fs::create_dir(dir.path().join("nested.csv")).expect("mkdir");

        let sources = discover_sources(dir.path(), 2).expect("discover");
        let stems: Vec<&str> = sources.iter().map(SourceId::stem).collect();
        assert_eq!(stems, ["a", "b"]);

        let all = discover_sources(dir.path(), 100).expect("discover");
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = tempdir().expect("tempdir");
        assert!(discover_sources(dir.path(), 5).expect("discover").is_empty());
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempdir().expect("tempdir");
        let err = discover_sources(&dir.path().join("absent"), 5).expect_err("must fail");
        assert!(matches!(err, SourceReadError::Io { .. }));
    }
}
