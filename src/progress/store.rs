/// Durable progress record under the user's configuration directory
use crate::config::types::{QuestConfig, QuestError, Result, STATE_FILE};
use crate::progress::state::ProgressState;
use crate::safety::safe_cleanup;
use log::{info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write to a temp file in the same directory, then rename over the target.
fn replace_file(target: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = target
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;

    let temp_path = parent.join(format!(
        ".{}.tmp.{}",
        target.file_name().unwrap_or_default().to_string_lossy(),
        std::process::id()
    ));

    {
        let mut f = fs::File::create(&temp_path)?;
        f.write_all(content)?;
        f.sync_all()?;
    }

    fs::rename(&temp_path, target)
}

/// Owner of `state.bin`
#[derive(Debug, Clone)]
pub struct ProgressStore {
    dir: PathBuf,
}

impl ProgressStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &QuestConfig) -> Self {
        Self::new(config.state_dir.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }

    /// Read the record. Anything unreadable, mis-sized or failing its checksum
    /// is reported as absent; a damaged record is never partially trusted.
    pub fn load(&self) -> Option<ProgressState> {
        let path = self.path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Cannot read progress record {}: {}", path.display(), e);
                return None;
            }
        };

        let Some(state) = ProgressState::decode(&bytes) else {
            warn!(
                "Progress record {} has unexpected size {}, ignoring it",
                path.display(),
                bytes.len()
            );
            return None;
        };

        if !state.is_intact() {
            warn!("Progress record {} failed its integrity check, ignoring it", path.display());
            return None;
        }

        Some(state)
    }

    /// Seal `state` with a fresh checksum and write it out
    pub fn save(&self, state: &mut ProgressState) -> Result<()> {
        state.seal();

        fs::create_dir_all(&self.dir).map_err(|e| {
            QuestError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create state directory {}: {}", self.dir.display(), e),
            ))
        })?;

        let path = self.path();
        replace_file(&path, &state.encode()).map_err(|e| {
            QuestError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write progress record {}: {}", path.display(), e),
            ))
        })?;

        info!(
            "Saved progress: challenge {} in {}",
            state.challenge,
            path.display()
        );
        Ok(())
    }

    /// Load the record, or persist and return a fresh default one
    pub fn load_or_init(&self) -> Result<ProgressState> {
        if let Some(state) = self.load() {
            return Ok(state);
        }

        info!("No valid progress found, starting fresh");
        let mut state = ProgressState::default();
        self.save(&mut state)?;
        Ok(state)
    }

    /// Delete the whole state directory
    pub fn clear(&self) -> Result<()> {
        safe_cleanup::remove_tree_forced(&self.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::hash;
    use crate::progress::state::RECORD_LEN;

    fn store_in(temp: &tempfile::TempDir) -> ProgressStore {
        ProgressStore::new(temp.path().join(".config").join("bashquest"))
    }

    #[test]
    fn test_load_missing_is_absent() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(store_in(&temp).load().is_none());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = store_in(&temp);

        let mut state = ProgressState::default();
        state.challenge = 4;
        state.expected_flag_hash = hash::flag_hash("AbCdEf");
        state.set_workspace(Path::new("/tmp/quest/workspace"));
        store.save(&mut state).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.challenge, 4);
        assert_eq!(loaded.expected_flag_hash, hash::flag_hash("AbCdEf"));
        assert_eq!(
            loaded.workspace_path().unwrap(),
            PathBuf::from("/tmp/quest/workspace")
        );
        assert_eq!(fs::metadata(store.path()).unwrap().len() as usize, RECORD_LEN);
    }

    #[test]
    fn test_save_overwrites_stale_checksum() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = store_in(&temp);

        let mut state = ProgressState::default();
        state.checksum = 0xdead_beef;
        store.save(&mut state).unwrap();
        assert!(store.load().is_some());
    }

    #[test]
    fn test_tampered_record_is_absent() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = store_in(&temp);

        let mut state = ProgressState::default();
        store.save(&mut state).unwrap();

        let mut bytes = fs::read(store.path()).unwrap();
        bytes[0] = 2; // jump ahead to challenge 2
        fs::write(store.path(), &bytes).unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn test_truncated_record_is_absent() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = store_in(&temp);

        let mut state = ProgressState::default();
        store.save(&mut state).unwrap();
        let bytes = fs::read(store.path()).unwrap();
        fs::write(store.path(), &bytes[..100]).unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_or_init_persists_default() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = store_in(&temp);

        let state = store.load_or_init().unwrap();
        assert_eq!(state.challenge, 1);
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_clear_removes_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = store_in(&temp);
        store.load_or_init().unwrap();

        store.clear().unwrap();
        assert!(!store.dir().exists());
        store.clear().unwrap();
    }
}
