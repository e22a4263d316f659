use serde::{Deserialize, Serialize};

use crate::model::ModuleId;

/// Completion flags for the four storybook modules.
///
/// Every module always has a flag; a fresh state has all of them unset.
/// Serializes as an object keyed by the module short key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(default)]
    elf: bool,
    #[serde(default)]
    reindeer: bool,
    #[serde(default)]
    ethics: bool,
    #[serde(default)]
    emotion: bool,
}

/// Per-module view of progress, in unlock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleStatus {
    pub module: ModuleId,
    pub completed: bool,
    pub accessible: bool,
}

impl ProgressState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn flag_mut(&mut self, module: ModuleId) -> &mut bool {
        match module {
            ModuleId::Elf => &mut self.elf,
            ModuleId::Reindeer => &mut self.reindeer,
            ModuleId::Ethics => &mut self.ethics,
            ModuleId::Emotion => &mut self.emotion,
        }
    }

    #[must_use]
    pub fn is_completed(&self, module: ModuleId) -> bool {
        match module {
            ModuleId::Elf => self.elf,
            ModuleId::Reindeer => self.reindeer,
            ModuleId::Ethics => self.ethics,
            ModuleId::Emotion => self.emotion,
        }
    }

    /// Set the completion flag for `module`. Completing twice is a no-op.
    pub fn complete(&mut self, module: ModuleId) {
        *self.flag_mut(module) = true;
    }

    /// Clear every completion flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        ModuleId::ALL
            .iter()
            .filter(|module| self.is_completed(**module))
            .count()
    }

    /// Integer percentage of completed modules, rounded down.
    #[must_use]
    pub fn percent(&self) -> u8 {
        let pct = self.completed_count() * 100 / ModuleId::COUNT;
        u8::try_from(pct).unwrap_or(100)
    }

    #[must_use]
    pub fn all_complete(&self) -> bool {
        ModuleId::ALL.iter().all(|module| self.is_completed(*module))
    }

    /// Sequential unlock: the first module is always open, every other module
    /// opens once its predecessor is complete.
    #[must_use]
    pub fn is_accessible(&self, module: ModuleId) -> bool {
        module
            .predecessor()
            .is_none_or(|prev| self.is_completed(prev))
    }

    /// First module that is open but not yet completed.
    #[must_use]
    pub fn next_module(&self) -> Option<ModuleId> {
        ModuleId::ALL
            .into_iter()
            .find(|module| self.is_accessible(*module) && !self.is_completed(*module))
    }

    #[must_use]
    pub fn statuses(&self) -> Vec<ModuleStatus> {
        ModuleId::ALL
            .into_iter()
            .map(|module| ModuleStatus {
                module,
                completed: self.is_completed(module),
                accessible: self.is_accessible(module),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_has_nothing_completed() {
        let state = ProgressState::new();
        assert_eq!(state.completed_count(), 0);
        assert_eq!(state.percent(), 0);
        assert!(!state.all_complete());
        assert_eq!(state.next_module(), Some(ModuleId::Elf));
    }

    #[test]
    fn percent_rounds_down_per_module() {
        let mut state = ProgressState::new();
        let expected = [25, 50, 75, 100];
        for (module, pct) in ModuleId::ALL.into_iter().zip(expected) {
            state.complete(module);
            assert_eq!(state.percent(), pct);
        }
        assert!(state.all_complete());
        assert_eq!(state.next_module(), None);
    }

    #[test]
    fn accessibility_is_monotonic_in_completion() {
        let mut state = ProgressState::new();
        let mut previously_open: Vec<ModuleId> = Vec::new();

        for module in ModuleId::ALL {
            let open: Vec<_> = ModuleId::ALL
                .into_iter()
                .filter(|m| state.is_accessible(*m))
                .collect();
            for earlier in &previously_open {
                assert!(open.contains(earlier));
            }
            previously_open = open;
            state.complete(module);
        }
    }

    #[test]
    fn out_of_order_completion_does_not_unlock_gaps() {
        let mut state = ProgressState::new();
        state.complete(ModuleId::Ethics);

        assert!(state.is_accessible(ModuleId::Elf));
        assert!(!state.is_accessible(ModuleId::Reindeer));
        assert!(!state.is_accessible(ModuleId::Ethics));
        assert!(state.is_accessible(ModuleId::Emotion));
    }

    #[test]
    fn serializes_keyed_by_short_name() {
        let mut state = ProgressState::new();
        state.complete(ModuleId::Elf);
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "elf": true,
                "reindeer": false,
                "ethics": false,
                "emotion": false
            })
        );
    }

    #[test]
    fn missing_keys_deserialize_as_incomplete() {
        let state: ProgressState = serde_json::from_str(r#"{"elf":true}"#).unwrap();
        assert!(state.is_completed(ModuleId::Elf));
        assert!(!state.is_completed(ModuleId::Emotion));
    }

    #[test]
    fn reset_clears_flags() {
        let mut state = ProgressState::new();
        for module in ModuleId::ALL {
            state.complete(module);
        }
        state.reset();
        assert_eq!(state, ProgressState::default());
    }
}
