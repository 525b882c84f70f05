//! File path utilities for local state.
//!
//! Everything the catalog keeps on disk (favorites database, logs) lives
//! under a single data root.

use std::path::{Path, PathBuf};

/// File path manager for local data files
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    /// Create a new DataPaths with the given root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get logs directory
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Create all necessary directories
    pub fn create_dirs(&self) -> std::io::Result<()> {
        for dir in [self.root.clone(), self.logs_dir()] {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}
