//! Module completion tracking over a visitor's session state.
//!
//! Every operation lazily creates the progress flags, so callers never need to
//! initialize a session up front. Identifiers outside the fixed module table
//! are never an error: they simply do nothing and report `false`.

use storybook_core::model::{ModuleId, ModuleStatus, ProgressState, SessionState};
use tracing::debug;

/// Ensure all four module flags exist. Idempotent.
pub fn initialize(state: &mut SessionState) -> &mut ProgressState {
    state.progress_mut()
}

/// Mark a module complete by short (`elf`) or full (`elf_crisis`) name.
///
/// Returns `false` and leaves the state untouched when the name is unknown.
pub fn mark_complete(state: &mut SessionState, key: &str) -> bool {
    let progress = initialize(state);
    let Some(module) = ModuleId::resolve(key) else {
        debug!(key, "ignoring completion for unknown module");
        return false;
    };
    progress.complete(module);
    debug!(module = %module, percent = progress.percent(), "module completed");
    true
}

/// Completion percentage over the four modules, rounded down.
pub fn get_progress(state: &mut SessionState) -> u8 {
    initialize(state).percent()
}

pub fn all_complete(state: &mut SessionState) -> bool {
    initialize(state).all_complete()
}

/// Sequential unlock check. Unknown names are never accessible.
pub fn is_accessible(state: &mut SessionState, key: &str) -> bool {
    let progress = initialize(state);
    ModuleId::resolve(key).is_some_and(|module| progress.is_accessible(module))
}

/// Clear every completion flag.
pub fn reset(state: &mut SessionState) {
    initialize(state).reset();
    debug!("progress reset");
}

/// Per-module completion and accessibility, in unlock order.
pub fn modules(state: &mut SessionState) -> Vec<ModuleStatus> {
    initialize(state).statuses()
}

/// The module the visitor should play next, if any remain.
pub fn next_module(state: &mut SessionState) -> Option<ModuleId> {
    initialize(state).next_module()
}
