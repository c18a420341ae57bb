//! Strategy selection for mood classification.
//!
//! The remote strategy is tried first when configured; any failure falls
//! back to the keyword strategy, so [`MoodClassifier::classify`] always
//! produces an assessment.

use super::fallback::KeywordStrategy;
use super::lexicon::MoodLexicon;
use super::remote::{RemoteConfig, RemoteStrategy};
use super::MoodAssessment;
use crate::error::ClassifyError;
use crate::storage::Config;

/// One way of classifying text.
#[derive(Debug, Clone)]
pub enum ClassifierStrategy {
    Remote(RemoteStrategy),
    Fallback(KeywordStrategy),
}

impl ClassifierStrategy {
    /// Run this strategy. Only the remote variant can fail.
    pub async fn run(&self, text: &str) -> Result<MoodAssessment, ClassifyError> {
        match self {
            ClassifierStrategy::Remote(remote) => remote.classify(text).await,
            ClassifierStrategy::Fallback(keywords) => Ok(keywords.classify(text)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClassifierStrategy::Remote(_) => "remote",
            ClassifierStrategy::Fallback(_) => "fallback",
        }
    }
}

/// Mood classifier with a remote-first, keyword-fallback policy.
#[derive(Debug, Clone)]
pub struct MoodClassifier {
    remote: Option<ClassifierStrategy>,
    fallback: KeywordStrategy,
}

impl MoodClassifier {
    /// Classifier that only ever uses the keyword strategy.
    pub fn offline(lexicon: MoodLexicon) -> Self {
        Self {
            remote: None,
            fallback: KeywordStrategy::new(lexicon),
        }
    }

    /// Classifier that tries `remote` before the keyword strategy.
    pub fn with_remote(remote: RemoteStrategy, lexicon: MoodLexicon) -> Self {
        Self {
            remote: Some(ClassifierStrategy::Remote(remote)),
            fallback: KeywordStrategy::new(lexicon),
        }
    }

    /// Build from application config.
    ///
    /// The lexicon is loaded once here. The remote strategy is skipped when
    /// `classifier.enabled` is false or its HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Self {
        let lexicon = MoodLexicon::from_config(&config.lexicon);
        if !config.classifier.enabled {
            return Self::offline(lexicon);
        }

        match RemoteStrategy::new(RemoteConfig::from_config(&config.classifier)) {
            Ok(remote) => Self::with_remote(remote, lexicon),
            Err(e) => {
                tracing::warn!(error = %e, "remote classifier unavailable, using keywords only");
                Self::offline(lexicon)
            }
        }
    }

    /// Whether a remote strategy will be attempted.
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Strategies in the order they are attempted.
    pub fn strategies(&self) -> Vec<ClassifierStrategy> {
        let mut out: Vec<ClassifierStrategy> = self.remote.iter().cloned().collect();
        out.push(ClassifierStrategy::Fallback(self.fallback.clone()));
        out
    }

    /// Classify `text`. Never fails.
    pub async fn classify(&self, text: &str) -> MoodAssessment {
        if let Some(remote) = &self.remote {
            match remote.run(text).await {
                Ok(assessment) => return assessment,
                Err(ClassifyError::MissingApiKey { env_var }) => {
                    tracing::debug!(%env_var, "no API key, using keyword classifier");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "remote mood classification failed, falling back");
                }
            }
        }

        self.fallback.classify(text)
    }

    /// Classify with the keyword strategy only.
    pub fn classify_offline(&self, text: &str) -> MoodAssessment {
        self.fallback.classify(text)
    }
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self::offline(MoodLexicon::default())
    }
}
