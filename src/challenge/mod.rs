//! Challenge builders.
//!
//! Each variant lays out a directory tree in a freshly reset workspace and
//! returns the flag the learner has to discover. The quest engine turns that
//! flag into a hash and records it with the workspace path.

pub mod names;
pub mod registry;
pub mod variants;

use crate::config::types::Result;
use crate::safety::workspace::Workspace;
use names::NameGenerator;
use std::fmt;

/// Where a challenge wants its workspace rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceSite {
    /// The configured workspace under the working directory
    Fresh,
    /// The path recorded by the previous challenge, falling back to `Fresh`
    Recorded,
}

/// Builder contract shared by every challenge variant.
pub trait Challenge: Send + Sync {
    /// Stable identifier accepted by `goto`
    fn id(&self) -> &'static str;
    fn title(&self) -> &'static str;
    /// Instructions shown to the learner
    fn description(&self) -> &'static [&'static str];

    fn site(&self) -> WorkspaceSite {
        WorkspaceSite::Fresh
    }

    /// Populate `workspace` and return the flag
    fn build(&self, workspace: &Workspace, names: &mut NameGenerator) -> Result<String>;
}

impl fmt::Debug for dyn Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Challenge").field("id", &self.id()).finish()
    }
}
