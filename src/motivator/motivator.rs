use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;

const PHRASES: [&str; 22] = [
    "Come on! 🔥",
    "Let's go! 🚀",
    "You got this! 💪",
    "Keep going! ⚡",
    "Go for it! 🎯",
    "Push it! 💥",
    "You've got it! ⭐",
    "Almost there! 🏁",
    "Don't stop now! ⏩",
    "Bring it on! 🦁",
    "One more! 💯",
    "Keep it up! 📈",
    "You're killing it! 😎",
    "Come on, champ! 🏆",
    "Let's do this! 👊",
    "Crush it! 🗡️",
    "Finish strong! 🏋️",
    "Dig deep! ⛏️",
    "Make it happen! ✨",
    "You're unstoppable! 🌟",
    "Go get 'em! 🐯",
    "Now or never! ⏰",
];

// Other symbols, currency symbols, modifier symbols.
static DECORATIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{So}\p{Sc}\p{Sk}]").expect("static pattern"));

pub fn phrases() -> &'static [&'static str] {
    &PHRASES
}

pub fn pick_decorated() -> &'static str {
    PHRASES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(PHRASES[0])
}

pub fn pick_plain() -> String {
    strip_decorations(pick_decorated())
}

/// Remove decorative symbol characters, leaving text and spacing as is.
pub fn strip_decorations(phrase: &str) -> String {
    DECORATIONS.replace_all(phrase, "").into_owned()
}
