//! bashquest: a command-line trainer for shell navigation
//!
//! Each challenge builds a disposable directory tree; the learner navigates it
//! with `cd`, `ls`, tab completion and `cat`, finds the hidden directory name
//! and submits it as a flag.
//!
//! # Architecture
//!
//! ## Safety & Workspace ([`safety`])
//! - [`safety::safe_cleanup`]: forced-permission tree removal that never follows symlinks
//! - [`safety::workspace`]: reset-to-empty sandbox and tree-building helpers
//!
//! ## Challenges ([`challenge`])
//! - [`challenge::names`]: short, long and random directory names
//! - [`challenge::variants`]: one builder per challenge
//! - [`challenge::registry`]: play order and lookup by number or id
//!
//! ## Progress ([`progress`])
//! - [`progress::state`]: fixed-size record with a path buffer and checksum
//! - [`progress::store`]: load/save under `~/.config/bashquest/state.bin`
//! - [`progress::hash`]: checksum and flag hashes (not cryptographic)
//!
//! ## Verdict ([`verdict`])
//! - [`verdict::flag`]: submitted flag against the recorded hash
//!
//! ## Engine & CLI
//! - [`quest`]: start, submit, goto, reset
//! - [`cli`]: argument parsing and user-facing output
//!
//! Single user, single process. Nothing is locked; concurrent invocations may
//! corrupt progress.

// Configuration & errors
pub mod config;

// Safety & Workspace
pub mod safety;

// Challenges
pub mod challenge;

// Progress
pub mod progress;

// Verdict
pub mod verdict;

// Engine
pub mod quest;

// CLI entrypoint wiring for the bashquest binary.
pub mod cli;

pub use config::types::{QuestConfig, QuestError, Result};
pub use quest::{Quest, SubmitOutcome};
