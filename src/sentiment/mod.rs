//! Sentiment classification
//!
//! A classifier turns review text into one of the three canonical categories
//! plus a score. The score is a polarity in `[-1, 1]` for the lexicon
//! classifier and a model confidence for remote classifiers.

mod lexicon;
mod remote;

use crate::Result;
use crate::config::{ClassifierConfig, ClassifierProvider};
use crate::review::Sentiment;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub use lexicon::LexiconClassifier;
pub use remote::RemoteClassifier;

/// Outcome of classifying one piece of text
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub score: f64,
}

#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    async fn classify(&self, text: &str) -> Result<Classification>;
}

/// Build the classifier selected in the configuration.
pub fn create_classifier(config: &ClassifierConfig) -> anyhow::Result<Arc<dyn SentimentClassifier>> {
    match config.provider {
        ClassifierProvider::Lexicon => Ok(Arc::new(LexiconClassifier::new(
            config.positive_threshold,
            config.negative_threshold,
        ))),
        ClassifierProvider::Remote => {
            let url = config
                .url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("classifier.url is required for the remote provider"))?;
            let classifier = RemoteClassifier::new(
                url,
                config.api_key.clone(),
                config.timeout_secs.map(Duration::from_secs),
                &config.labels,
            )?;
            Ok(Arc::new(classifier))
        }
    }
}
