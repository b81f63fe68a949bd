//! Temporary workspace holding the segment files of one split operation.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A uniquely named temporary directory that owns all segment files produced
/// by one split operation.
///
/// The directory is removed when the workspace is dropped, on every exit path.
/// Removal failures are logged and never escalated.
#[derive(Debug)]
pub struct SplitWorkspace {
    dir: Option<TempDir>,
}

impl SplitWorkspace {
    /// Create a fresh workspace under the system temp directory.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("scriba_split_")
            .tempdir()
            .context("Failed to create temporary directory for audio segments")?;

        crate::verbose!("Created split workspace at {}", dir.path().display());
        Ok(Self { dir: Some(dir) })
    }

    pub fn path(&self) -> &Path {
        // dir is only None after Drop has run
        self.dir.as_ref().expect("workspace already removed").path()
    }

    /// Output path for the segment at the given plan index.
    pub fn segment_path(&self, index: u64) -> PathBuf {
        self.path().join(format!("segment_{index:03}.wav"))
    }
}

impl Drop for SplitWorkspace {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            if let Err(err) = dir.close() {
                crate::verbose!(
                    "Failed to remove split workspace {}: {err}",
                    path.display()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_path_naming() {
        let workspace = SplitWorkspace::create().unwrap();
        let path = workspace.segment_path(7);
        assert_eq!(path.file_name().unwrap(), "segment_007.wav");
        assert!(path.starts_with(workspace.path()));
    }

    #[test]
    fn test_drop_removes_workspace_and_contents() {
        let workspace = SplitWorkspace::create().unwrap();
        let root = workspace.path().to_path_buf();
        std::fs::write(workspace.segment_path(0), b"segment bytes").unwrap();
        std::fs::write(workspace.segment_path(1), b"more segment bytes").unwrap();
        assert!(root.exists());

        drop(workspace);
        assert!(!root.exists());
    }
}
