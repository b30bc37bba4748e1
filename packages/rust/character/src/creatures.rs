//! Creatures whose names contain "of".
//!
//! The death parser splits `a <creature> of <owner>` into a summon and its
//! owner. Creatures listed here carry "of" in their own name and must be
//! left whole.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use tibiadex_shared::{Result, TibiaDexError};

static BUILTIN_TEXT: &str = include_str!("../data/creatures_with_of.txt");

static BUILTIN: LazyLock<CreatureList> = LazyLock::new(|| CreatureList::from_text(BUILTIN_TEXT));

/// A closed set of creature names, compared verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatureList {
    names: HashSet<String>,
}

impl CreatureList {
    /// Parse one name per line; blank lines and `#` comments are ignored.
    pub fn from_text(text: &str) -> Self {
        let names = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect();
        Self { names }
    }

    /// The list shipped with the crate.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Load a replacement list from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| TibiaDexError::io(path, e))?;
        let list = Self::from_text(&text);
        tracing::debug!(?path, creatures = list.len(), "loaded creature list");
        Ok(list)
    }

    /// Whether `name` (without its leading article) is a listed creature.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_contains_known_creatures() {
        let list = CreatureList::builtin();
        assert!(list.contains("lord of the elements"));
        assert!(list.contains("spirit of fire"));
        assert!(list.contains("memory of a wolf"));
        assert!(!list.contains("fire elemental"));
        assert!(list.len() > 100);
    }

    #[test]
    fn comments_and_blanks_skipped() {
        let list = CreatureList::from_text("# header\n\n  bane of light  \n#gust of wind\n");
        assert_eq!(list.len(), 1);
        assert!(list.contains("bane of light"));
        assert!(!list.contains("gust of wind"));
    }

    #[test]
    fn lookup_is_verbatim() {
        let list = CreatureList::builtin();
        assert!(!list.contains("Lord Of The Elements"));
        assert!(!list.contains("a lord of the elements"));
    }

    #[test]
    fn load_missing_file_fails() {
        let err = CreatureList::load(Path::new("/nonexistent/creatures.txt")).unwrap_err();
        assert!(matches!(err, TibiaDexError::Io { .. }));
    }
}
