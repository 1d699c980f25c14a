//! Quest engine
//!
//! Ties the progress record to the challenge registry: building a challenge
//! resets its workspace, records the flag hash and workspace path, and saves.
//! A correct submission advances the record and builds the next challenge.
//!
//! There is no locking. Two invocations racing on the same `state.bin` or
//! workspace can leave them inconsistent.

use crate::challenge::names::NameGenerator;
use crate::challenge::{registry, Challenge, WorkspaceSite};
use crate::config::types::{QuestConfig, QuestError, Result, WORKSPACE_DIR};
use crate::progress::hash::flag_hash;
use crate::progress::{ProgressState, ProgressStore};
use crate::safety::safe_cleanup;
use crate::safety::workspace::Workspace;
use crate::verdict;
use log::info;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Result of submitting a flag
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Flag accepted and the next challenge is ready
    Advanced {
        number: u32,
        challenge: &'static dyn Challenge,
    },
    /// Flag accepted on the last challenge
    Finished,
    /// Flag rejected; progress unchanged
    Wrong,
    /// No active challenge left; progress unchanged
    AlreadyComplete,
}

pub struct Quest {
    config: QuestConfig,
    store: ProgressStore,
    names: NameGenerator,
    state: ProgressState,
}

impl Quest {
    /// Load progress, replacing a missing or damaged record with a fresh one
    pub fn open(config: QuestConfig, names: NameGenerator) -> Result<Self> {
        let store = ProgressStore::from_config(&config);
        let state = store.load_or_init()?;
        Ok(Self {
            config,
            store,
            names,
            state,
        })
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn config(&self) -> &QuestConfig {
        &self.config
    }

    /// Active challenge number (1-based)
    pub fn number(&self) -> u32 {
        self.state.challenge
    }

    /// Active challenge, or `None` once every challenge is solved
    pub fn current(&self) -> Option<&'static dyn Challenge> {
        registry::by_number(self.state.challenge)
    }

    pub fn is_complete(&self) -> bool {
        self.current().is_none()
    }

    pub fn workspace(&self) -> Option<PathBuf> {
        self.state.workspace_path()
    }

    /// Build the first challenge, discarding any progress
    pub fn start(&mut self) -> Result<&'static dyn Challenge> {
        self.setup(1)
    }

    /// Jump to a challenge by number or id and build it
    pub fn goto(&mut self, target: &str) -> Result<(u32, &'static dyn Challenge)> {
        let number = registry::resolve(target)
            .ok_or_else(|| QuestError::UnknownChallenge(target.to_string()))?;
        let challenge = self.setup(number)?;
        Ok((number, challenge))
    }

    pub fn submit(&mut self, flag: &str) -> Result<SubmitOutcome> {
        if self.is_complete() {
            return Ok(SubmitOutcome::AlreadyComplete);
        }

        if !verdict::verify(&self.state, flag) {
            info!("Rejected flag for challenge {}", self.state.challenge);
            return Ok(SubmitOutcome::Wrong);
        }

        info!("Accepted flag for challenge {}", self.state.challenge);
        self.state.challenge = self.state.challenge.saturating_add(1);
        self.store.save(&mut self.state)?;

        let number = self.state.challenge;
        if registry::by_number(number).is_none() {
            return Ok(SubmitOutcome::Finished);
        }

        let challenge = self.setup(number)?;
        Ok(SubmitOutcome::Advanced { number, challenge })
    }

    /// Delete the progress record and the workspace
    pub fn reset(self) -> Result<()> {
        self.store.clear()?;
        safe_cleanup::remove_tree_forced(&self.config.workspace_dir)?;

        if let Some(recorded) = self.recorded_workspace() {
            if recorded != self.config.workspace_dir {
                safe_cleanup::remove_tree_forced(&recorded)?;
            }
        }

        info!("Progress reset");
        Ok(())
    }

    fn setup(&mut self, number: u32) -> Result<&'static dyn Challenge> {
        let challenge = registry::by_number(number)
            .ok_or_else(|| QuestError::UnknownChallenge(number.to_string()))?;

        let root = match challenge.site() {
            WorkspaceSite::Fresh => self.config.workspace_dir.clone(),
            WorkspaceSite::Recorded => self
                .recorded_workspace()
                .unwrap_or_else(|| self.config.workspace_dir.clone()),
        };

        let workspace = Workspace::prepare(&root)?;
        let flag = challenge.build(&workspace, &mut self.names)?;

        self.state.challenge = number;
        self.state.expected_flag_hash = flag_hash(&flag);
        self.state.set_workspace(workspace.root());
        self.store.save(&mut self.state)?;

        info!(
            "Built challenge {} ({}) in {}",
            number,
            challenge.id(),
            workspace.root().display()
        );
        Ok(challenge)
    }

    /// The recorded workspace, only if it still looks like one of ours.
    /// Rebuilding or deleting it is destructive, so anything not named
    /// `workspace` is ignored.
    fn recorded_workspace(&self) -> Option<PathBuf> {
        self.state
            .workspace_path()
            .filter(|p| p.is_absolute() && p.file_name() == Some(OsStr::new(WORKSPACE_DIR)))
    }
}
