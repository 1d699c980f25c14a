use crate::challenge::names::NameGenerator;
use crate::challenge::{Challenge, WorkspaceSite};
use crate::config::types::Result;
use crate::safety::workspace::Workspace;

/// Same shape as the first challenge, but with names nobody wants to type.
#[derive(Debug, Clone, Default)]
pub struct TabCompletion;

impl Challenge for TabCompletion {
    fn id(&self) -> &'static str {
        "tab_completion"
    }

    fn title(&self) -> &'static str {
        "Tab completion"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Same task, but directory names are painful to type.",
            "Use tab completion.",
        ]
    }

    fn site(&self) -> WorkspaceSite {
        WorkspaceSite::Recorded
    }

    fn build(&self, workspace: &Workspace, names: &mut NameGenerator) -> Result<String> {
        let chain = names.long_names();
        workspace.create_chain(&chain)?;
        Ok(chain[2].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_tree_every_time() {
        let temp = tempfile::TempDir::new().unwrap();
        let root = temp.path().join("workspace");

        for seed in [1, 2] {
            let ws = Workspace::prepare(&root).unwrap();
            let flag = TabCompletion
                .build(&ws, &mut NameGenerator::seeded(seed))
                .unwrap();
            assert_eq!(flag, "final_directory_that_you_should_autocomplete");
            assert!(ws
                .root()
                .join("extraordinarily_long_directory_name")
                .join("another_unnecessarily_verbose_directory")
                .join("final_directory_that_you_should_autocomplete")
                .is_dir());
        }
    }
}
