use storybook_core::model::{Emotion, LetterData, preview};

use super::chooser::{Chooser, RandomChooser};
use super::templates::{
    CLOSINGS, CONNECTIONS, FALLBACK_GREETING, FEELING_QUOTE_CHARS, LOCATIONS, MEMORIES,
    MEMORY_APPRECIATION, OPENINGS, POSTSCRIPT, SIGN_OFF, SIGNATURE_NAME, WISH_ACKNOWLEDGMENT,
    WISHES, age_message, feeling_pool,
};

/// Builds reply letters, drawing every variable sentence through a `Chooser`.
///
/// Paragraphs for optional letter fields are simply left out when the field is
/// missing, blank or (for age) not a whole number.
#[derive(Debug, Clone)]
pub struct ReplyGenerator<C> {
    chooser: C,
}

impl<C: Chooser> ReplyGenerator<C> {
    #[must_use]
    pub fn new(chooser: C) -> Self {
        Self { chooser }
    }

    /// Assemble a full reply for `letter`. Paragraphs are separated by a
    /// blank line and the text ends with the postscript.
    pub fn generate(&mut self, letter: &LetterData) -> String {
        let mut lines: Vec<String> = Vec::new();

        let greeting = letter
            .name()
            .map_or_else(|| FALLBACK_GREETING.to_owned(), |name| format!("Dear {name},"));
        paragraph(&mut lines, [greeting]);

        let opening = self.pick(&OPENINGS);
        paragraph(&mut lines, [opening.to_owned()]);

        if let Some(country) = letter.country() {
            let location = self.pick(&LOCATIONS).replace("{country}", country);
            paragraph(&mut lines, [location]);
        }

        if let Some(band) = letter.age_band() {
            paragraph(&mut lines, [age_message(band).to_owned()]);
        }

        if let Some(feeling) = letter.feeling() {
            let emotion = Emotion::detect(feeling);
            let response = self.pick(feeling_pool(emotion));
            let quote = format!(
                "When you wrote '{}', I could sense the depth of what you're experiencing.",
                preview(feeling, FEELING_QUOTE_CHARS)
            );
            paragraph(&mut lines, [response.to_owned(), quote]);
        }

        if letter.wish().is_some() {
            let response = self.pick(&WISHES);
            paragraph(
                &mut lines,
                [response.to_owned(), WISH_ACKNOWLEDGMENT.to_owned()],
            );
        }

        if letter.memory().is_some() {
            let response = self.pick(&MEMORIES);
            paragraph(
                &mut lines,
                [response.to_owned(), MEMORY_APPRECIATION.to_owned()],
            );
        }

        let connection = self.pick(&CONNECTIONS);
        paragraph(&mut lines, [connection.to_owned()]);

        let closing = self.pick(&CLOSINGS);
        paragraph(&mut lines, [closing.to_owned()]);

        paragraph(&mut lines, [SIGN_OFF.to_owned(), SIGNATURE_NAME.to_owned()]);
        lines.push(POSTSCRIPT.to_owned());

        lines.join("\n")
    }

    fn pick(&mut self, pool: &[&'static str]) -> &'static str {
        let idx = self.chooser.choose_index(pool.len());
        pool.get(idx).or(pool.last()).copied().unwrap_or_default()
    }
}

fn paragraph(lines: &mut Vec<String>, sentences: impl IntoIterator<Item = String>) {
    lines.extend(sentences);
    lines.push(String::new());
}

/// Generate a reply with the thread-local random generator.
#[must_use]
pub fn generate_reply(letter: &LetterData) -> String {
    ReplyGenerator::new(RandomChooser::thread()).generate(letter)
}
