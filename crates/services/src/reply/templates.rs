use storybook_core::model::{AgeBand, Emotion};

pub(super) const FALLBACK_GREETING: &str = "Dear Friend,";

pub(super) const OPENINGS: [&str; 3] = [
    "I received your letter, and I want you to know how much it means to me that you took the time to share your thoughts with me.",
    "Your letter arrived at the North Pole, and I've read it with great care and attention.",
    "I'm writing to you from my workshop, where your letter sits on my desk, and I've been thinking about what you shared.",
];

/// `{country}` is replaced with the visitor's country.
pub(super) const LOCATIONS: [&str; 3] = [
    "I can see you're writing from {country}, and I'm so glad your letter found its way to me.",
    "From {country} to the North Pole—your words have traveled far, and I'm honored to receive them.",
    "Even though we're far apart (you in {country} and me at the North Pole), your words have brought us closer.",
];

pub(super) fn age_message(band: AgeBand) -> &'static str {
    match band {
        AgeBand::Child => {
            "I can see you're still young, and I want you to know that your feelings and thoughts are just as important as anyone else's."
        }
        AgeBand::Teen => {
            "I know that being your age can bring many challenges and joys, and I appreciate you sharing your heart with me."
        }
        AgeBand::Adult => {
            "Even though you're older now, I believe that the magic of Christmas lives in all of us, regardless of age."
        }
    }
}

const HAPPY: [&str; 3] = [
    "I can feel the joy radiating from your words, and it warms my heart like a cozy fire on a winter's night.",
    "Your happiness is like a bright star in the night sky, and I'm so glad to see you shining.",
    "The joy in your letter has made my workshop even merrier today!",
];

const SAD: [&str; 3] = [
    "I can sense the weight in your heart, and I want you to know that even in the darkest nights, stars still shine.",
    "Your feelings matter deeply to me, and I want you to remember that every storm eventually passes.",
    "I understand that sometimes the world feels heavy, but you are stronger than you know.",
];

const EXCITED: [&str; 3] = [
    "Your excitement is contagious! I can almost hear the anticipation in your words.",
    "The energy in your letter has me checking my list twice with extra enthusiasm!",
    "Your excitement reminds me why I love this magical time of year so much.",
];

const ANXIOUS: [&str; 3] = [
    "I can sense the worry in your words, and I want you to know that it's okay to feel uncertain sometimes.",
    "Your concerns are valid, and I hope you find peace in knowing that you're not alone.",
    "Even when things feel uncertain, remember that you have the strength to face whatever comes.",
];

const GRATEFUL: [&str; 3] = [
    "Your gratitude shines through your words like a beacon of light, and it touches my heart deeply.",
    "The appreciation in your letter reminds me of the true spirit of Christmas.",
    "Your thankfulness is a gift in itself, and I'm honored to receive it.",
];

const HOPEFUL: [&str; 3] = [
    "Your hope is like a candle in the darkness, and I believe it will guide you to wonderful things.",
    "I can feel the optimism in your words, and it gives me great joy to see your spirit.",
    "Your hopeful heart is one of the most beautiful things I've read this season.",
];

const LONELY: [&str; 3] = [
    "I can feel the loneliness in your words, and I want you to know that you are never truly alone.",
    "Even when it feels like no one understands, remember that I'm here, and I care about you.",
    "Your letter reached me, and I want you to know that you matter, deeply and truly.",
];

const PEACEFUL: [&str; 3] = [
    "The peace in your words is like a gentle snowfall, quiet and beautiful.",
    "Your calm spirit brings a sense of tranquility that I cherish.",
    "I can sense the serenity in your heart, and it's a beautiful thing to witness.",
];

const GENERIC: [&str; 3] = [
    "I can feel the emotions in your words, and they touch my heart in ways words cannot fully express.",
    "Your feelings come through clearly in your letter, and I want you to know they matter to me.",
    "The emotions you've shared with me are precious, and I hold them close to my heart.",
];

/// Sentence pool answering a detected emotion.
#[must_use]
pub fn feeling_pool(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Happy => &HAPPY,
        Emotion::Sad => &SAD,
        Emotion::Excited => &EXCITED,
        Emotion::Anxious => &ANXIOUS,
        Emotion::Grateful => &GRATEFUL,
        Emotion::Hopeful => &HOPEFUL,
        Emotion::Lonely => &LONELY,
        Emotion::Peaceful => &PEACEFUL,
        Emotion::Generic => &GENERIC,
    }
}

/// Characters of the feeling text quoted back in the reply.
pub(super) const FEELING_QUOTE_CHARS: usize = 50;

pub(super) const WISHES: [&str; 3] = [
    "I've read your wish carefully, and while I can't promise everything, I can promise that I'll do my best.",
    "Your wish has been noted in my special book, and I'll carry it with me on my journey.",
    "I understand what you're hoping for, and I want you to know that sometimes the best gifts aren't the ones we can hold.",
];

pub(super) const WISH_ACKNOWLEDGMENT: &str = "I understand that you're hoping for something meaningful, and I want you to know that your wishes are heard.";

pub(super) const MEMORIES: [&str; 3] = [
    "The memory you shared is beautiful, and I'm so glad you have it to hold close.",
    "That memory sounds precious, and I hope it continues to bring you warmth.",
    "Thank you for sharing that special moment with me. Memories like that are the true treasures of life.",
];

pub(super) const MEMORY_APPRECIATION: &str = "Memories like the one you shared are the threads that weave the tapestry of our lives, and I'm grateful you chose to share yours with me.";

pub(super) const CONNECTIONS: [&str; 3] = [
    "As I prepare for my journey around the world, I carry your words with me, and I want you to know that you matter.",
    "In a world that sometimes feels too busy, your letter reminded me of what truly matters—connection, understanding, and the human heart.",
    "Your letter has touched me in ways I can't fully express, and I hope my words can bring you some comfort and joy.",
];

pub(super) const CLOSINGS: [&str; 5] = [
    "May this Christmas bring you peace, joy, and the warmth of love surrounding you.",
    "I'll be thinking of you on Christmas Eve, and I hope you feel the magic in the air.",
    "Remember, the greatest gifts aren't always wrapped in boxes—they're the moments of connection, the acts of kindness, and the love we share.",
    "May your heart be light, your spirit bright, and your Christmas filled with wonder.",
    "I believe in you, and I believe in the magic of this season. May it bring you everything you need.",
];

pub(super) const SIGN_OFF: &str = "With warmth and love,";

pub const SIGNATURE_NAME: &str = "Santa Claus";

pub(super) const POSTSCRIPT: &str = "P.S. Remember, you are never alone, and you are deeply valued.";
