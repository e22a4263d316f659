use serde::Serialize;

/// Emotion category detected from the "feeling" part of a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happy,
    Sad,
    Excited,
    Anxious,
    Grateful,
    Hopeful,
    Lonely,
    Peaceful,
    Generic,
}

/// Keyword lists per category. Order matters: the first category with a
/// matching keyword wins.
pub const EMOTION_KEYWORDS: [(Emotion, &[&str]); 8] = [
    (
        Emotion::Happy,
        &["happy", "joy", "joyful", "glad", "cheerful", "merry", "delighted", "ecstatic"],
    ),
    (
        Emotion::Sad,
        &["sad", "down", "depressed", "unhappy", "melancholy", "blue", "upset"],
    ),
    (
        Emotion::Excited,
        &["excited", "thrilled", "eager", "enthusiastic", "pumped", "energetic"],
    ),
    (
        Emotion::Anxious,
        &["anxious", "worried", "nervous", "stressed", "concerned", "uneasy"],
    ),
    (
        Emotion::Grateful,
        &["grateful", "thankful", "appreciative", "blessed"],
    ),
    (
        Emotion::Hopeful,
        &["hopeful", "optimistic", "hoping", "wishful", "positive"],
    ),
    (Emotion::Lonely, &["lonely", "alone", "isolated", "lonesome"]),
    (
        Emotion::Peaceful,
        &["peaceful", "calm", "serene", "tranquil", "relaxed", "content"],
    ),
];

impl Emotion {
    /// Case-insensitive substring scan over [`EMOTION_KEYWORDS`].
    ///
    /// Empty text and text without any keyword map to `Emotion::Generic`.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let lowered = text.to_lowercase();
        EMOTION_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
            .map_or(Emotion::Generic, |(emotion, _)| *emotion)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Excited => "excited",
            Emotion::Anxious => "anxious",
            Emotion::Grateful => "grateful",
            Emotion::Hopeful => "hopeful",
            Emotion::Lonely => "lonely",
            Emotion::Peaceful => "peaceful",
            Emotion::Generic => "generic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_category() {
        assert_eq!(Emotion::detect("I feel HAPPY today"), Emotion::Happy);
        assert_eq!(Emotion::detect("kind of melancholy"), Emotion::Sad);
        assert_eq!(Emotion::detect("so thrilled!"), Emotion::Excited);
        assert_eq!(Emotion::detect("a bit nervous"), Emotion::Anxious);
        assert_eq!(Emotion::detect("very thankful"), Emotion::Grateful);
        assert_eq!(Emotion::detect("optimistic about it"), Emotion::Hopeful);
        assert_eq!(Emotion::detect("isolated lately"), Emotion::Lonely);
        assert_eq!(Emotion::detect("Calm and quiet"), Emotion::Peaceful);
    }

    #[test]
    fn no_keyword_is_generic() {
        assert_eq!(Emotion::detect("it is what it is"), Emotion::Generic);
        assert_eq!(Emotion::detect(""), Emotion::Generic);
    }

    #[test]
    fn earlier_category_wins_ties() {
        // "unhappy" contains "happy", and happy is scanned first.
        assert_eq!(Emotion::detect("unhappy"), Emotion::Happy);
        // "sad" and "lonely" both match; sad comes first.
        assert_eq!(Emotion::detect("sad and lonely"), Emotion::Sad);
    }

    #[test]
    fn substring_matches_count() {
        // "content" hides inside "discontent".
        assert_eq!(Emotion::detect("discontent"), Emotion::Peaceful);
    }
}
