/// Challenge workspace sandbox
/// Every challenge build starts from an empty, fully writable root so that
/// permission lockdowns left by a previous challenge never block a rebuild.

use crate::config::types::{QuestError, Result};
use crate::safety::safe_cleanup;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Traverse-only: `cd` and open-by-name work, listing does not.
pub const EXECUTE_ONLY: u32 = 0o111;

/// Readable by everyone, writable by nobody.
pub const READ_ONLY: u32 = 0o444;

/// Ensure `path` exists as an empty directory, whatever was there before.
pub fn reset_workspace(path: &Path) -> Result<()> {
    safe_cleanup::remove_tree_forced(path)?;

    fs::create_dir_all(path).map_err(|e| {
        QuestError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to create workspace directory {}: {}", path.display(), e),
        ))
    })?;

    log::info!("Workspace reset at {}", path.display());
    Ok(())
}

/// A freshly reset workspace root that challenge builders populate
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Reset `root` and hand back a builder anchored at its absolute path
    pub fn prepare(root: &Path) -> Result<Self> {
        let root = std::path::absolute(root).map_err(|e| {
            QuestError::Config(format!(
                "Failed to resolve workspace path {}: {}",
                root.display(),
                e
            ))
        })?;
        reset_workspace(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create one directory below the root. The parent must already exist and
    /// the directory must not.
    pub fn create_dir(&self, relative: &Path) -> Result<PathBuf> {
        let path = self.root.join(relative);
        fs::create_dir(&path).map_err(|e| {
            QuestError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create directory {}: {}", path.display(), e),
            ))
        })?;
        log::debug!("Created {}", path.display());
        Ok(path)
    }

    /// Create each directory of `chain` nested inside the previous one and
    /// return the deepest path relative to the root.
    pub fn create_chain<S: AsRef<str>>(&self, chain: &[S]) -> Result<PathBuf> {
        let mut relative = PathBuf::new();
        for name in chain {
            relative.push(name.as_ref());
            self.create_dir(&relative)?;
        }
        Ok(relative)
    }

    /// Write a plaintext file below the root
    pub fn write_file(&self, relative: &Path, contents: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        fs::write(&path, contents).map_err(|e| {
            QuestError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write file {}: {}", path.display(), e),
            ))
        })?;
        Ok(path)
    }

    /// Replace the permission bits of an entry below the root
    pub fn set_mode(&self, relative: &Path, mode: u32) -> Result<()> {
        let path = self.root.join(relative);
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).map_err(|e| {
            QuestError::Filesystem(format!(
                "Failed to set permissions {:o} on {}: {}",
                mode,
                path.display(),
                e
            ))
        })?;
        log::debug!("Set permissions {:o} on {}", mode, path.display());
        Ok(())
    }
}
