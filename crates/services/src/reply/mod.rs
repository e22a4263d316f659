//! Personalized reply letters assembled from static sentence pools.

mod chooser;
mod generator;
mod templates;

pub use chooser::{Chooser, FixedChooser, RandomChooser};
pub use generator::{ReplyGenerator, generate_reply};
pub use templates::{SIGNATURE_NAME, feeling_pool};
