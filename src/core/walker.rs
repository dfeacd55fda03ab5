use std::path::{Path, PathBuf};
use ignore::WalkBuilder;
use tracing::debug;

use crate::config::ScanConfig;
use crate::error::{DoxyfillError, Result};

/// Recursively discovers annotatable source files under a root
pub struct SourceWalker {
    config: ScanConfig,
}

impl SourceWalker {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// All qualifying files under `root`, sorted by path. A root that is a
    /// file is returned on its own if its name qualifies.
    pub fn discover<P: AsRef<Path>>(&self, root: P) -> Result<Vec<PathBuf>> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(DoxyfillError::FileSystem(format!(
                "{} does not exist",
                root.display()
            )));
        }

        let walker = WalkBuilder::new(root)
            .standard_filters(self.config.respect_ignore_files)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| DoxyfillError::FileSystem(e.to_string()))?;

            // Links are not followed into directories, but a link to a file counts
            let is_file = entry.file_type().map_or(false, |ft| ft.is_file())
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            if self.config.accepts(&entry.file_name().to_string_lossy()) {
                files.push(entry.into_path());
            } else {
                debug!("Ignoring {}", entry.path().display());
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_discovers_allow_listed_files_recursively() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("main.c").write_str("").unwrap();
        temp.child("include/api.h").write_str("").unwrap();
        temp.child("src/deep/widget.cpp").write_str("").unwrap();
        temp.child("src/deep/widget.hpp").write_str("").unwrap();
        temp.child("README.md").write_str("").unwrap();
        temp.child("build.rs").write_str("").unwrap();

        let walker = SourceWalker::new(&ScanConfig::default());
        let mut found: Vec<_> = walker
            .discover(temp.path())
            .unwrap()
            .into_iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        found.sort();

        let expected: Vec<PathBuf> = vec![
            PathBuf::from("include/api.h"),
            PathBuf::from("main.c"),
            PathBuf::from("src/deep/widget.cpp"),
            PathBuf::from("src/deep/widget.hpp"),
        ];
        assert_eq!(found, expected);
    }

    #[test]
    fn test_hidden_files_included_by_default() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".generated/table.c").write_str("").unwrap();

        let walker = SourceWalker::new(&ScanConfig::default());
        assert_eq!(walker.discover(temp.path()).unwrap().len(), 1);
    }

    #[test]
    fn test_custom_extensions() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.cc").write_str("").unwrap();
        temp.child("b.c").write_str("").unwrap();

        let config = ScanConfig {
            extensions: vec![".cc".to_string()],
            ..ScanConfig::default()
        };
        let found = SourceWalker::new(&config).discover(temp.path()).unwrap();

        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("a.cc"));
    }

    #[test]
    fn test_root_may_be_a_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("solo.h");
        file.write_str("").unwrap();

        let found = SourceWalker::new(&ScanConfig::default()).discover(file.path()).unwrap();
        assert_eq!(found, vec![file.path().to_path_buf()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_included() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("real/impl.c").write_str("int a;\n").unwrap();
        std::os::unix::fs::symlink(temp.path().join("real/impl.c"), temp.path().join("link.c")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("linked_dir")).unwrap();

        let mut found: Vec<_> = SourceWalker::new(&ScanConfig::default())
            .discover(temp.path())
            .unwrap()
            .into_iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        found.sort();

        assert_eq!(found, vec![PathBuf::from("link.c"), PathBuf::from("real/impl.c")]);
    }

    #[test]
    fn test_missing_root() {
        let temp = assert_fs::TempDir::new().unwrap();
        let result = SourceWalker::new(&ScanConfig::default()).discover(temp.path().join("nope"));
        assert!(matches!(result, Err(DoxyfillError::FileSystem(_))));
    }
}
