use crate::challenge::variants::{
    cd_maze::CdMaze, cd_permissions::CdPermissions, deepest::DeepestDirectory,
    tab_completion::TabCompletion,
};
use crate::challenge::Challenge;

static CHALLENGES: [&dyn Challenge; 4] = [
    &DeepestDirectory,
    &TabCompletion,
    &CdMaze,
    &CdPermissions,
];

/// Every challenge, in play order
pub fn all() -> &'static [&'static dyn Challenge] {
    &CHALLENGES
}

pub fn count() -> u32 {
    CHALLENGES.len() as u32
}

/// Look up a challenge by its 1-based number
pub fn by_number(number: u32) -> Option<&'static dyn Challenge> {
    let index = usize::try_from(number.checked_sub(1)?).ok()?;
    CHALLENGES.get(index).copied()
}

/// Resolve a `goto` target: a 1-based number or a challenge id
pub fn resolve(target: &str) -> Option<u32> {
    if !target.is_empty() && target.bytes().all(|b| b.is_ascii_digit()) {
        let number = target.parse::<u32>().ok()?;
        return by_number(number).map(|_| number);
    }

    CHALLENGES
        .iter()
        .position(|c| c.id() == target)
        .map(|index| index as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_are_one_based() {
        assert!(by_number(0).is_none());
        assert_eq!(by_number(1).unwrap().id(), "deepest");
        assert_eq!(by_number(4).unwrap().id(), "cd_permissions");
        assert!(by_number(count() + 1).is_none());
    }

    #[test]
    fn test_resolve_by_number_and_id() {
        assert_eq!(resolve("2"), Some(2));
        assert_eq!(resolve("cd_maze"), Some(3));
        assert_eq!(resolve("0"), None);
        assert_eq!(resolve("5"), None);
        assert_eq!(resolve("nope"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = all().iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all().len());
    }
}
