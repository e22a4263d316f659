use serde::Serialize;
use storybook_core::model::{Emotion, LetterData, ModuleId, ModuleStatus, SessionState};

use crate::progress_tracker;

/// Progress overview shown on the story map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapView {
    pub progress: u8,
    pub all_complete: bool,
    pub next_module: Option<ModuleId>,
    pub modules: Vec<ModuleStatus>,
}

impl MapView {
    pub(crate) fn from_state(state: &mut SessionState) -> Self {
        Self {
            progress: progress_tracker::get_progress(state),
            all_complete: progress_tracker::all_complete(state),
            next_module: progress_tracker::next_module(state),
            modules: progress_tracker::modules(state),
        }
    }
}

/// A single module page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleView {
    pub module: ModuleId,
    pub title: &'static str,
    pub path: &'static str,
    pub completed: bool,
    pub progress: u8,
}

impl ModuleView {
    pub(crate) fn from_state(state: &mut SessionState, module: ModuleId) -> Self {
        let progress = state.progress_mut();
        Self {
            module,
            title: module.title(),
            path: module.full_key(),
            completed: progress.is_completed(module),
            progress: progress.percent(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinaleView {
    pub progress: u8,
}

/// Stored letter plus the short excerpts used on the letter page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterView {
    pub letter: LetterData,
    pub wish_preview: Option<String>,
    pub memory_preview: Option<String>,
}

impl LetterView {
    pub(crate) fn from_letter(letter: &LetterData) -> Self {
        Self {
            letter: letter.clone(),
            wish_preview: letter.wish_preview(),
            memory_preview: letter.memory_preview(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyView {
    pub reply: String,
    pub emotion: Emotion,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn map_view_serializes_for_templates() {
        let mut state = SessionState::new();
        progress_tracker::mark_complete(&mut state, "elf");

        let value = serde_json::to_value(MapView::from_state(&mut state)).unwrap();
        assert_eq!(value["progress"], json!(25));
        assert_eq!(value["all_complete"], json!(false));
        assert_eq!(value["next_module"], json!("reindeer"));
        assert_eq!(
            value["modules"][1],
            json!({ "module": "reindeer", "completed": false, "accessible": true })
        );
        assert_eq!(value["modules"][2]["accessible"], json!(false));
    }

    #[test]
    fn module_view_uses_full_path() {
        let mut state = SessionState::new();
        let view = ModuleView::from_state(&mut state, ModuleId::Ethics);
        assert_eq!(view.path, "gift_ethics");
        assert!(!view.completed);
        assert_eq!(view.progress, 0);
    }

    #[test]
    fn letter_view_previews_long_fields() {
        let letter = LetterData {
            wish: Some("w".repeat(120)),
            memory: Some("short".into()),
            submitted: true,
            ..LetterData::default()
        };
        let view = LetterView::from_letter(&letter);
        assert_eq!(view.wish_preview, Some(format!("{}...", "w".repeat(100))));
        assert_eq!(view.memory_preview.as_deref(), Some("short"));
    }
}
