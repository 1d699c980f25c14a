use crate::challenge::names::NameGenerator;
use crate::challenge::Challenge;
use crate::config::types::{Result, INSTRUCTIONS_FILE};
use crate::safety::workspace::{Workspace, EXECUTE_ONLY, READ_ONLY};
use std::path::PathBuf;

/// Random three-level tree that cannot be listed.
///
/// Every directory is `--x--x--x`: `cd` and opening a file by exact name work,
/// `ls` does not. Each directory carries a `r--r--r--` instruction file that
/// names the next directory; the deepest one says its own name is the flag.
#[derive(Debug, Clone, Default)]
pub struct CdPermissions;

fn next_step(name: &str) -> String {
    format!("To continue, cd into:\n{}\n", name)
}

const LEAF_NOTE: &str = "You reached the deepest directory.\n\
                         The directory name is the flag.\n\
                         Use pwd to show the full path.\n";

impl Challenge for CdPermissions {
    fn id(&self) -> &'static str {
        "cd_permissions"
    }

    fn title(&self) -> &'static str {
        "Change directory with restricted permissions"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "You cannot list directories.",
            "Read INSTRUCTIONS.txt and use 'cd'.",
            "The flag is the deepest directory name.",
            "Use pwd anytime to show the current path.",
        ]
    }

    fn build(&self, workspace: &Workspace, names: &mut NameGenerator) -> Result<String> {
        let chain = [names.random_name(), names.random_name(), names.random_name()];
        workspace.create_chain(&chain)?;

        let levels: Vec<PathBuf> = (1..=chain.len())
            .map(|depth| chain[..depth].iter().collect())
            .collect();

        workspace.write_file(&levels[0].join(INSTRUCTIONS_FILE), &next_step(&chain[1]))?;
        workspace.write_file(&levels[1].join(INSTRUCTIONS_FILE), &next_step(&chain[2]))?;
        workspace.write_file(&levels[2].join(INSTRUCTIONS_FILE), LEAF_NOTE)?;

        for level in &levels {
            workspace.set_mode(&level.join(INSTRUCTIONS_FILE), READ_ONLY)?;
        }
        for level in &levels {
            workspace.set_mode(level, EXECUTE_ONLY)?;
        }

        let [_, _, flag] = chain;
        Ok(flag)
    }
}
