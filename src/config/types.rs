//! Shared error type and path configuration.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory under `$HOME` holding the progress record
pub const CONFIG_SUBPATH: &str = ".config/bashquest";

/// Progress record file name inside the state directory
pub const STATE_FILE: &str = "state.bin";

/// Workspace directory name, created under the invoking working directory
pub const WORKSPACE_DIR: &str = "workspace";

/// Instruction file name written by challenges that hide their layout
pub const INSTRUCTIONS_FILE: &str = "INSTRUCTIONS.txt";

#[derive(Error, Debug)]
pub enum QuestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Filesystem error: {0}")]
    Filesystem(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HOME is not set; cannot locate the progress directory")]
    HomeUnresolved,

    #[error("Unknown challenge: {0}")]
    UnknownChallenge(String),
}

pub type Result<T> = std::result::Result<T, QuestError>;

/// Locations the quest reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestConfig {
    /// Directory holding `state.bin`
    pub state_dir: PathBuf,
    /// Default workspace root for challenges that start a fresh tree
    pub workspace_dir: PathBuf,
}

impl QuestConfig {
    pub fn new(state_dir: impl Into<PathBuf>, workspace_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
            workspace_dir: workspace_dir.into(),
        }
    }

    /// Resolve the per-user state directory from `$HOME` and the workspace
    /// from the current working directory.
    pub fn from_env() -> Result<Self> {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .ok_or(QuestError::HomeUnresolved)?;

        let cwd = std::env::current_dir().map_err(|e| {
            QuestError::Config(format!("Failed to get current directory: {}", e))
        })?;

        Ok(Self::new(home.join(CONFIG_SUBPATH), cwd.join(WORKSPACE_DIR)))
    }

    /// Full path of the progress record
    pub fn state_file(&self) -> PathBuf {
        self.state_dir.join(STATE_FILE)
    }

    pub fn workspace_dir(&self) -> &Path {
        &self.workspace_dir
    }
}
