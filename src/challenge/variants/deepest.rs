use crate::challenge::names::NameGenerator;
use crate::challenge::Challenge;
use crate::config::types::Result;
use crate::safety::workspace::Workspace;

/// Three nested directories with short random names; the deepest is the flag.
#[derive(Debug, Clone, Default)]
pub struct DeepestDirectory;

impl Challenge for DeepestDirectory {
    fn id(&self) -> &'static str {
        "deepest"
    }

    fn title(&self) -> &'static str {
        "Find the deepest directory"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Three directories were created, one inside another, inside workspace.",
            "Find the deepest one. The flag is its name.",
        ]
    }

    fn build(&self, workspace: &Workspace, names: &mut NameGenerator) -> Result<String> {
        let chain = [names.short_name(), names.short_name(), names.short_name()];
        workspace.create_chain(&chain)?;
        Ok(chain[2].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::names::SHORT_NAMES;
    use std::fs;
    use std::path::Path;

    fn only_child(dir: &Path) -> String {
        let entries: Vec<_> = fs::read_dir(dir).unwrap().map(|e| e.unwrap()).collect();
        assert_eq!(entries.len(), 1, "{} should hold one entry", dir.display());
        assert!(entries[0].file_type().unwrap().is_dir());
        entries[0].file_name().to_string_lossy().into_owned()
    }

    #[test]
    fn test_builds_linear_depth_three() {
        let temp = tempfile::TempDir::new().unwrap();
        let ws = Workspace::prepare(&temp.path().join("workspace")).unwrap();
        let mut names = NameGenerator::seeded(11);

        let flag = DeepestDirectory.build(&ws, &mut names).unwrap();

        let d1 = only_child(ws.root());
        let d2 = only_child(&ws.root().join(&d1));
        let d3 = only_child(&ws.root().join(&d1).join(&d2));
        let leaf = ws.root().join(&d1).join(&d2).join(&d3);
        assert_eq!(fs::read_dir(&leaf).unwrap().count(), 0);

        assert_eq!(flag, d3);
        for name in [&d1, &d2, &d3] {
            assert!(SHORT_NAMES.contains(&name.as_str()));
        }
    }
}
