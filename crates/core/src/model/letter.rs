use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── LETTER TYPES ──────────────────────────────────────────────────────────────
//

/// Raw letter form as submitted by the visitor. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LetterForm {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub feeling: Option<String>,
    pub wish: Option<String>,
    pub memory: Option<String>,
}

/// Letter stored in the visitor session.
///
/// A fresh value has every field unset and `submitted == false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterData {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub feeling: Option<String>,
    pub wish: Option<String>,
    pub memory: Option<String>,
    pub submitted: bool,
}

/// Fields that must be filled in before a letter counts as submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterField {
    Name,
    Feeling,
    Wish,
    Memory,
}

impl LetterField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LetterField::Name => "name",
            LetterField::Feeling => "feeling",
            LetterField::Wish => "wish",
            LetterField::Memory => "memory",
        }
    }
}

impl fmt::Display for LetterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── LETTER ERRORS ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LetterError {
    #[error("missing required letter fields: {}", join_fields(.0))]
    MissingFields(Vec<LetterField>),

    #[error("no letter has been submitted yet")]
    NotSubmitted,
}

fn join_fields(fields: &[LetterField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

//
// ─── VALIDATION ────────────────────────────────────────────────────────────────
//

impl LetterForm {
    /// Trim every field and check the required ones.
    ///
    /// On success the returned letter is marked as submitted.
    ///
    /// # Errors
    ///
    /// Returns `LetterError::MissingFields` listing every required field that is
    /// absent or blank.
    pub fn validate(self) -> Result<LetterData, LetterError> {
        let name = normalize_optional(self.name);
        let feeling = normalize_optional(self.feeling);
        let wish = normalize_optional(self.wish);
        let memory = normalize_optional(self.memory);

        let missing: Vec<LetterField> = [
            (LetterField::Name, name.is_none()),
            (LetterField::Feeling, feeling.is_none()),
            (LetterField::Wish, wish.is_none()),
            (LetterField::Memory, memory.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, is_missing)| is_missing.then_some(field))
        .collect();

        if !missing.is_empty() {
            return Err(LetterError::MissingFields(missing));
        }

        Ok(LetterData {
            name,
            age: normalize_optional(self.age),
            gender: normalize_optional(self.gender),
            country: normalize_optional(self.country),
            feeling,
            wish,
            memory,
            submitted: true,
        })
    }
}

impl LetterData {
    /// Name to greet, if one was given.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        non_blank(self.country.as_deref())
    }

    #[must_use]
    pub fn feeling(&self) -> Option<&str> {
        non_blank(self.feeling.as_deref())
    }

    #[must_use]
    pub fn wish(&self) -> Option<&str> {
        non_blank(self.wish.as_deref())
    }

    #[must_use]
    pub fn memory(&self) -> Option<&str> {
        non_blank(self.memory.as_deref())
    }

    /// Age band, when the age field holds an integer of any size.
    #[must_use]
    pub fn age_band(&self) -> Option<AgeBand> {
        non_blank(self.age.as_deref())
            .and_then(|raw| parse_years(raw.trim()))
            .map(AgeBand::from_years)
    }

    /// Short excerpt of the wish for display views.
    #[must_use]
    pub fn wish_preview(&self) -> Option<String> {
        self.wish().map(|wish| preview(wish, PREVIEW_CHARS))
    }

    /// Short excerpt of the memory for display views.
    #[must_use]
    pub fn memory_preview(&self) -> Option<String> {
        self.memory().map(|memory| preview(memory, PREVIEW_CHARS))
    }
}

const PREVIEW_CHARS: usize = 100;

/// Age groups used to pick the age-specific paragraph of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    Child,
    Teen,
    Adult,
}

impl AgeBand {
    #[must_use]
    pub fn from_years(years: i64) -> Self {
        if years < 13 {
            AgeBand::Child
        } else if years < 18 {
            AgeBand::Teen
        } else {
            AgeBand::Adult
        }
    }
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

/// Integers outside `i64` saturate so they still land in the outer bands.
fn parse_years(raw: &str) -> Option<i64> {
    if let Ok(years) = raw.parse::<i64>() {
        return Some(years);
    }
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|val| !val.trim().is_empty())
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
