mod emotion;
mod ids;
mod letter;
mod module;
mod progress;
mod session;

pub use emotion::{EMOTION_KEYWORDS, Emotion};
pub use ids::SessionId;
pub use letter::{AgeBand, LetterData, LetterError, LetterField, LetterForm, preview};
pub use module::{ModuleError, ModuleId};
pub use progress::{ModuleStatus, ProgressState};
pub use session::{SessionRecord, SessionState};
