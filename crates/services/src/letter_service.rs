//! Letter storage helpers over the visitor session.

use storybook_core::model::{LetterData, LetterError, LetterForm, SessionState};
use tracing::{debug, info};

use crate::reply::{Chooser, ReplyGenerator};

/// Ensure an empty, unsubmitted letter exists. Idempotent.
pub fn initialize_letter_session(state: &mut SessionState) -> &mut LetterData {
    state.letter_mut()
}

/// Validate and store a letter submission.
///
/// A successful submission replaces any previous letter and drops the cached
/// reply so the next reply is written for the new letter.
///
/// # Errors
///
/// Returns `LetterError::MissingFields` when `name`, `feeling`, `wish` or
/// `memory` is blank; the session is left exactly as it was.
pub fn save_letter_data(state: &mut SessionState, form: LetterForm) -> Result<(), LetterError> {
    let letter = form.validate()?;
    info!(
        has_age = letter.age.is_some(),
        has_country = letter.country.is_some(),
        "letter submitted"
    );
    state.letter = Some(letter);
    state.reply = None;
    Ok(())
}

pub fn get_letter_data(state: &mut SessionState) -> &LetterData {
    initialize_letter_session(state)
}

pub fn has_submitted_letter(state: &mut SessionState) -> bool {
    initialize_letter_session(state).submitted
}

/// Cached reply for the submitted letter, written on first request.
///
/// # Errors
///
/// Returns `LetterError::NotSubmitted` if no letter has been submitted.
pub fn santa_reply<'s, C: Chooser>(
    state: &'s mut SessionState,
    generator: &mut ReplyGenerator<C>,
) -> Result<&'s str, LetterError> {
    if !has_submitted_letter(state) {
        return Err(LetterError::NotSubmitted);
    }

    if state.reply.is_none() {
        let letter = state.letter.get_or_insert_with(LetterData::default);
        let reply = generator.generate(letter);
        debug!(chars = reply.chars().count(), "reply generated");
        state.reply = Some(reply);
    }

    Ok(state.reply.as_deref().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::{FixedChooser, RandomChooser};
    use storybook_core::model::LetterField;

    fn form() -> LetterForm {
        LetterForm {
            name: Some("Alex".into()),
            age: Some("".into()),
            gender: None,
            country: Some(" Canada ".into()),
            feeling: Some("I feel happy".into()),
            wish: Some("a bike".into()),
            memory: Some("sledding".into()),
        }
    }

    #[test]
    fn fresh_session_has_empty_letter() {
        let mut state = SessionState::new();
        assert!(!has_submitted_letter(&mut state));
        assert_eq!(get_letter_data(&mut state), &LetterData::default());
    }

    #[test]
    fn save_stores_trimmed_letter() {
        let mut state = SessionState::new();
        save_letter_data(&mut state, form()).unwrap();

        let letter = get_letter_data(&mut state);
        assert!(letter.submitted);
        assert_eq!(letter.country.as_deref(), Some("Canada"));
        assert_eq!(letter.age, None);
        assert!(has_submitted_letter(&mut state));
    }

    #[test]
    fn invalid_submission_changes_nothing() {
        let mut state = SessionState::new();
        save_letter_data(&mut state, form()).unwrap();
        let before = state.clone();

        let err = save_letter_data(
            &mut state,
            LetterForm {
                memory: Some("  ".into()),
                ..form()
            },
        )
        .unwrap_err();

        assert_eq!(err, LetterError::MissingFields(vec![LetterField::Memory]));
        assert_eq!(state, before);
    }

    #[test]
    fn reply_requires_a_submitted_letter() {
        let mut state = SessionState::new();
        let mut generator = ReplyGenerator::new(FixedChooser(0));
        assert_eq!(
            santa_reply(&mut state, &mut generator).unwrap_err(),
            LetterError::NotSubmitted
        );
        assert!(state.reply.is_none());
    }

    #[test]
    fn reply_is_cached_until_the_letter_changes() {
        let mut state = SessionState::new();
        save_letter_data(&mut state, form()).unwrap();

        let mut generator = ReplyGenerator::new(RandomChooser::seeded(1));
        let first = santa_reply(&mut state, &mut generator).unwrap().to_owned();
        assert!(first.starts_with("Dear Alex,"));
        assert!(first.contains("Canada"));

        let mut other = ReplyGenerator::new(FixedChooser(2));
        let second = santa_reply(&mut state, &mut other).unwrap().to_owned();
        assert_eq!(first, second);

        save_letter_data(
            &mut state,
            LetterForm {
                name: Some("Sam".into()),
                ..form()
            },
        )
        .unwrap();
        assert!(state.reply.is_none());
        let third = santa_reply(&mut state, &mut other).unwrap();
        assert!(third.starts_with("Dear Sam,"));
    }
}
