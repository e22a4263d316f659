mod view;
mod workflow;

// Public API of the story subsystem.
pub use crate::error::StoryError;
pub use view::{FinaleView, LetterView, MapView, ModuleView, ReplyView};
pub use workflow::{IN_MEMORY_STORE, ReplySource, StoryService};
