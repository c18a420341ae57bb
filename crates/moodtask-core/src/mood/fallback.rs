//! Deterministic keyword-based mood classification.
//!
//! Used when no remote service is configured or the remote call fails.
//! Counts lexicon trigger words in the lower-cased text and picks the mood
//! with the highest count, breaking ties with [`TIE_BREAK_ORDER`].

use super::lexicon::{MoodLexicon, TIE_BREAK_ORDER};
use super::{AssessmentSource, Mood, MoodAssessment};

/// Confidence floor, also used when nothing matches.
pub const MIN_CONFIDENCE: f64 = 0.1;

/// Confidence ceiling.
pub const MAX_CONFIDENCE: f64 = 1.0;

/// Mood reported when no trigger word matches.
pub const DEFAULT_MOOD: Mood = Mood::Focused;

/// Local classification strategy backed by a [`MoodLexicon`].
#[derive(Debug, Clone, Default)]
pub struct KeywordStrategy {
    lexicon: MoodLexicon,
}

impl KeywordStrategy {
    pub fn new(lexicon: MoodLexicon) -> Self {
        Self { lexicon }
    }

    /// Classify `text`. Always succeeds and is a pure function of the input
    /// and the lexicon.
    pub fn classify(&self, text: &str) -> MoodAssessment {
        let lowered = text.to_lowercase();

        let mut best: Option<(Mood, usize)> = None;
        for mood in TIE_BREAK_ORDER {
            let score = self.lexicon.score(&lowered, mood);
            // Strictly greater: on a tie the earlier mood in TIE_BREAK_ORDER stays.
            if score > 0 && best.map_or(true, |(_, top)| score > top) {
                best = Some((mood, score));
            }
        }

        let (mood, confidence) = match best {
            Some((mood, score)) => (mood, density(score, word_count(text))),
            None => (DEFAULT_MOOD, MIN_CONFIDENCE),
        };

        MoodAssessment {
            mood,
            confidence,
            explanation: explanation(mood).to_string(),
            source: AssessmentSource::Fallback,
        }
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Matches per input word, clamped to [MIN_CONFIDENCE, MAX_CONFIDENCE].
fn density(matches: usize, words: usize) -> f64 {
    if words == 0 {
        return MIN_CONFIDENCE;
    }
    (matches as f64 / words as f64).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Fixed explanation for a mood detected by keywords.
pub fn explanation(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "I detected positive and upbeat language in your message.",
        Mood::Tired => "Your message suggests you're feeling fatigued or low on energy.",
        Mood::Stressed => "I sense tension and pressure in your words.",
        Mood::Focused => "Your message indicates a clear and determined mindset.",
        Mood::Energetic => "I can feel high energy and motivation in your message.",
    }
}
