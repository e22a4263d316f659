#![forbid(unsafe_code)]

pub mod error;
pub mod letter_service;
pub mod progress_tracker;
pub mod reply;
pub mod story;

pub use storybook_core::Clock;

pub use error::{AppServicesError, StoryError};
pub use reply::{Chooser, FixedChooser, RandomChooser, ReplyGenerator, generate_reply};
pub use story::{
    FinaleView, IN_MEMORY_STORE, LetterView, MapView, ModuleView, ReplySource, ReplyView,
    StoryService,
};
