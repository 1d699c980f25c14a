use crate::challenge::names::NameGenerator;
use crate::challenge::Challenge;
use crate::config::types::Result;
use crate::safety::workspace::Workspace;
use std::path::Path;

pub const FLAG: &str = "treasure";
pub const DECOY: &str = "deadend";

/// A two-branch maze: `start/go_left/treasure` and `start/go_right/deadend`.
///
/// The decoy gets no special handling; submitting it is just a wrong flag.
#[derive(Debug, Clone, Default)]
pub struct CdMaze;

impl Challenge for CdMaze {
    fn id(&self) -> &'static str {
        "cd_maze"
    }

    fn title(&self) -> &'static str {
        "Navigate a directory maze using cd"
    }

    fn description(&self) -> &'static [&'static str] {
        &[
            "Navigate the directory maze using 'cd' to reach the hidden treasure.",
            "There are multiple paths, but only one leads to the deepest directory.",
            "The name of that directory is the flag.",
        ]
    }

    fn build(&self, workspace: &Workspace, _names: &mut NameGenerator) -> Result<String> {
        workspace.create_dir(Path::new("start"))?;
        workspace.create_dir(Path::new("start/go_left"))?;
        workspace.create_dir(Path::new("start/go_right"))?;
        workspace.create_dir(&Path::new("start/go_left").join(FLAG))?;
        workspace.create_dir(&Path::new("start/go_right").join(DECOY))?;
        Ok(FLAG.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_maze_layout() {
        let temp = tempfile::TempDir::new().unwrap();
        let ws = Workspace::prepare(&temp.path().join("workspace")).unwrap();

        let flag = CdMaze.build(&ws, &mut NameGenerator::seeded(0)).unwrap();
        assert_eq!(flag, "treasure");

        let start = ws.root().join("start");
        let mut branches: Vec<_> = fs::read_dir(&start)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        branches.sort();
        assert_eq!(branches, ["go_left", "go_right"]);

        assert!(start.join("go_left/treasure").is_dir());
        assert!(start.join("go_right/deadend").is_dir());
    }
}
