//! Trigger-word lexicon for the keyword fallback.
//!
//! A [`MoodLexicon`] is built once (defaults, optionally overridden from the
//! `[lexicon]` config section) and is immutable afterwards.

use std::collections::BTreeMap;

use super::Mood;
use crate::storage::config::LexiconConfig;

/// Order used to break ties between moods with the same keyword score.
///
/// Earlier entries win. Moods that call for a gentler ordering of work come
/// first.
pub const TIE_BREAK_ORDER: [Mood; 5] = [
    Mood::Stressed,
    Mood::Tired,
    Mood::Focused,
    Mood::Energetic,
    Mood::Happy,
];

const HAPPY_WORDS: &[&str] = &[
    "happy", "great", "awesome", "excited", "good", "wonderful", "fantastic", "cheerful",
    "joyful", "pleased", "delighted",
];

const TIRED_WORDS: &[&str] = &[
    "tired", "exhausted", "sleepy", "drained", "weary", "fatigue", "worn out", "beat", "drowsy",
    "lethargic",
];

const STRESSED_WORDS: &[&str] = &[
    "stressed", "overwhelmed", "anxious", "pressure", "worried", "tense", "frantic", "panic",
    "nervous", "uptight",
];

const FOCUSED_WORDS: &[&str] = &[
    "focused", "concentrated", "determined", "productive", "clear", "sharp", "alert",
    "attentive", "engaged",
];

const ENERGETIC_WORDS: &[&str] = &[
    "energetic", "motivated", "pumped", "active", "dynamic", "vigorous", "enthusiastic",
    "lively", "spirited",
];

/// Immutable mapping from mood to lower-case trigger words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodLexicon {
    words: BTreeMap<Mood, Vec<String>>,
}

impl MoodLexicon {
    /// Build a lexicon from explicit entries.
    ///
    /// Words are trimmed and lower-cased; blank and duplicate words are
    /// dropped. Moods without an entry get an empty word list.
    pub fn new<I, W>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Mood, W)>,
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        let mut words: BTreeMap<Mood, Vec<String>> =
            Mood::ALL.into_iter().map(|m| (m, Vec::new())).collect();

        for (mood, list) in entries {
            let normalized = normalize(list);
            words.insert(mood, normalized);
        }

        Self { words }
    }

    /// Default lexicon with per-mood overrides from configuration.
    ///
    /// A mood whose override is `None` keeps its default words.
    pub fn from_config(config: &LexiconConfig) -> Self {
        let mut lexicon = Self::default();
        for mood in Mood::ALL {
            if let Some(list) = config.words_for(mood) {
                lexicon.words.insert(mood, normalize(list));
            }
        }
        lexicon
    }

    /// Trigger words for a mood.
    pub fn words(&self, mood: Mood) -> &[String] {
        self.words.get(&mood).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of this mood's trigger words found as substrings of `lowered`.
    ///
    /// `lowered` must already be lower-case. Each word counts at most once.
    pub fn score(&self, lowered: &str, mood: Mood) -> usize {
        self.words(mood)
            .iter()
            .filter(|word| lowered.contains(word.as_str()))
            .count()
    }
}

impl Default for MoodLexicon {
    fn default() -> Self {
        Self::new([
            (Mood::Happy, HAPPY_WORDS),
            (Mood::Tired, TIRED_WORDS),
            (Mood::Stressed, STRESSED_WORDS),
            (Mood::Focused, FOCUSED_WORDS),
            (Mood::Energetic, ENERGETIC_WORDS),
        ])
    }
}

fn normalize<W>(list: W) -> Vec<String>
where
    W: IntoIterator,
    W::Item: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for word in list {
        let word = word.as_ref().trim().to_lowercase();
        if !word.is_empty() && !out.contains(&word) {
            out.push(word);
        }
    }
    out
}
