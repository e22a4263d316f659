use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── MODULE IDENTITY ───────────────────────────────────────────────────────────
//

/// One of the four storybook stages, in unlock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleId {
    Elf,
    Reindeer,
    Ethics,
    Emotion,
}

/// Fixed `(module, short key, full key)` table. Row order is the unlock order.
const MODULE_TABLE: [(ModuleId, &str, &str); 4] = [
    (ModuleId::Elf, "elf", "elf_crisis"),
    (ModuleId::Reindeer, "reindeer", "reindeer_navigation"),
    (ModuleId::Ethics, "ethics", "gift_ethics"),
    (ModuleId::Emotion, "emotion", "emotion_stabilizer"),
];

impl ModuleId {
    /// All modules in unlock order.
    pub const ALL: [ModuleId; 4] = [
        ModuleId::Elf,
        ModuleId::Reindeer,
        ModuleId::Ethics,
        ModuleId::Emotion,
    ];

    /// Number of modules in the story.
    pub const COUNT: usize = Self::ALL.len();

    /// Resolve either the short key (`elf`) or the full key (`elf_crisis`).
    ///
    /// Matching is exact; anything outside the table yields `None`.
    #[must_use]
    pub fn resolve(key: &str) -> Option<Self> {
        MODULE_TABLE
            .iter()
            .find(|(_, short, full)| *short == key || *full == key)
            .map(|(module, _, _)| *module)
    }

    /// Key used for progress state.
    #[must_use]
    pub fn short_key(self) -> &'static str {
        MODULE_TABLE[self.index()].1
    }

    /// Key used in URLs.
    #[must_use]
    pub fn full_key(self) -> &'static str {
        MODULE_TABLE[self.index()].2
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            ModuleId::Elf => "Elf Crisis",
            ModuleId::Reindeer => "Reindeer Navigation",
            ModuleId::Ethics => "Gift Ethics",
            ModuleId::Emotion => "Emotion Stabilizer",
        }
    }

    /// Position in the unlock order, starting at 0.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            ModuleId::Elf => 0,
            ModuleId::Reindeer => 1,
            ModuleId::Ethics => 2,
            ModuleId::Emotion => 3,
        }
    }

    /// The module that must be completed before this one unlocks.
    #[must_use]
    pub fn predecessor(self) -> Option<Self> {
        self.index()
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_key())
    }
}

//
// ─── PARSING ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModuleError {
    #[error("unknown module: {0}")]
    Unknown(String),
}

impl FromStr for ModuleId {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| ModuleError::Unknown(s.to_owned()))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_full_names_resolve_to_same_module() {
        for module in ModuleId::ALL {
            assert_eq!(ModuleId::resolve(module.short_key()), Some(module));
            assert_eq!(ModuleId::resolve(module.full_key()), Some(module));
        }
        assert_eq!(ModuleId::resolve("elf_crisis"), Some(ModuleId::Elf));
        assert_eq!(ModuleId::resolve("gift_ethics"), Some(ModuleId::Ethics));
    }

    #[test]
    fn unknown_keys_do_not_resolve() {
        assert_eq!(ModuleId::resolve("santa"), None);
        assert_eq!(ModuleId::resolve(""), None);
        assert_eq!(ModuleId::resolve("ELF"), None);
        assert!(matches!(
            "sleigh".parse::<ModuleId>(),
            Err(ModuleError::Unknown(key)) if key == "sleigh"
        ));
    }

    #[test]
    fn predecessor_follows_unlock_order() {
        assert_eq!(ModuleId::Elf.predecessor(), None);
        assert_eq!(ModuleId::Reindeer.predecessor(), Some(ModuleId::Elf));
        assert_eq!(ModuleId::Ethics.predecessor(), Some(ModuleId::Reindeer));
        assert_eq!(ModuleId::Emotion.predecessor(), Some(ModuleId::Ethics));
    }

    #[test]
    fn index_matches_table_order() {
        for (idx, module) in ModuleId::ALL.iter().enumerate() {
            assert_eq!(module.index(), idx);
        }
    }
}
