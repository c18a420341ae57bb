pub mod config;
pub mod mood;
pub mod plan;
pub mod task;

use std::future::Future;

use moodtask_core::{Config, MoodAssessment, MoodClassifier};

/// Drive a future to completion on a single-threaded runtime.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

/// Classify `text` with the configured strategies, or keywords only when
/// `offline` is set.
pub(crate) fn classify(
    config: &Config,
    text: &str,
    offline: bool,
) -> Result<MoodAssessment, Box<dyn std::error::Error>> {
    let classifier = MoodClassifier::from_config(config);
    if offline || !classifier.has_remote() {
        tracing::debug!(offline, "using keyword classifier only");
        return Ok(classifier.classify_offline(text));
    }
    let assessment = block_on(classifier.classify(text))?;
    tracing::debug!(source = assessment.source.as_str(), mood = %assessment.mood, "classified");
    Ok(assessment)
}
