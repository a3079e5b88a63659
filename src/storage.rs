// src/storage.rs - Async storage backends for document contents

use crate::location::Location;
use async_trait::async_trait;
use log::{debug, warn};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Where document bytes come from and go to.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn read_all(&self, location: &Location) -> io::Result<Vec<u8>>;

    /// Replace the full contents of `location`, creating it if needed.
    async fn replace_all(&self, location: &Location, contents: Vec<u8>) -> io::Result<()>;

    /// Friendly name for `location`, if the backend knows one.
    fn display_name(&self, _location: &Location) -> Option<String> {
        None
    }
}

/// Local filesystem storage.
///
/// Writes go to a hidden sibling of the resolved target which is then renamed
/// over it, so a failed write never truncates the existing file. Symlinks are
/// written through and the target keeps its permissions.
#[derive(Debug, Default, Clone)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }

    fn staging_path(path: &Path) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(path.file_name().unwrap_or_default());
        name.push(format!(".~{}", std::process::id()));
        path.with_file_name(name)
    }
}

#[async_trait]
impl StorageBackend for FsStorage {
    async fn read_all(&self, location: &Location) -> io::Result<Vec<u8>> {
        let bytes = tokio::fs::read(location.path()).await?;
        debug!("Read {} bytes from {}", bytes.len(), location);
        Ok(bytes)
    }

    async fn replace_all(&self, location: &Location, contents: Vec<u8>) -> io::Result<()> {
        // A target that does not exist yet is created at the path as given
        let target = tokio::fs::canonicalize(location.path())
            .await
            .unwrap_or_else(|_| location.path().to_path_buf());
        let permissions = tokio::fs::metadata(&target)
            .await
            .ok()
            .map(|meta| meta.permissions());
        let staging = Self::staging_path(&target);
        let len = contents.len();

        if let Err(e) = tokio::fs::write(&staging, contents).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e);
        }
        if let Some(permissions) = permissions
            && let Err(e) = tokio::fs::set_permissions(&staging, permissions).await
        {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e);
        }
        if let Err(e) = tokio::fs::rename(&staging, &target).await {
            warn!("Failed to move {} into place: {}", staging.display(), e);
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e);
        }

        debug!("Wrote {} bytes to {}", len, location);
        Ok(())
    }

    fn display_name(&self, location: &Location) -> Option<String> {
        // A symlink is shown under its own name, not its target's
        std::fs::symlink_metadata(location.path()).ok()?;
        location
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }
}
