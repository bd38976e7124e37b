//! Review Service - orchestrates classification, storage, paging and reports
//!
//! Every operation opens its own store handle on the blocking pool and drops
//! it before returning, whether the operation succeeded or not. The service
//! itself holds no mutable state and can be shared freely between requests.

mod page;
mod report;

use crate::review::{NewReview, Review, Sentiment};
use crate::sentiment::{Classification, SentimentClassifier};
use crate::storage::{Database, ReviewStore, SentimentCounts};
use crate::{Error, Result};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use page::{Page, PageRequest, total_pages};
pub use report::Report;

pub struct ReviewService {
    database: Database,
    classifier: Arc<dyn SentimentClassifier>,
    fallback: Option<Sentiment>,
    default_page_size: u32,
}

impl ReviewService {
    pub fn new(database: Database, classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self {
            database,
            classifier,
            fallback: None,
            default_page_size: crate::config::DEFAULT_PAGE_SIZE,
        }
    }

    /// Sentiment to store when the classifier fails. `None` fails the create instead.
    pub fn with_fallback(mut self, fallback: Option<Sentiment>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_default_page_size(mut self, per_page: u32) -> Self {
        self.default_page_size = per_page.max(1);
        self
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    /// Classify and persist a new review.
    ///
    /// The classifier runs exactly once. Nothing is written if the classifier
    /// fails without a fallback or if the insert fails.
    pub async fn create(&self, new: NewReview) -> Result<Review> {
        new.validate()?;

        let classification = self.classify(&new.review).await?;
        let review = self
            .with_store(move |store| store.insert_review(&new, classification.sentiment))
            .await?;

        info!(
            "Created review {} by '{}' ({}, score {:.3})",
            review.id, review.name, review.sentiment, classification.score
        );
        Ok(review)
    }

    /// One page of reviews in insertion order. Pages past the end are empty.
    pub async fn list(&self, request: PageRequest) -> Result<Page<Review>> {
        let (items, total) = self
            .with_store(move |store| {
                let total = store.count_reviews()?;
                let items = store.list_reviews(request.limit(), request.offset())?;
                Ok((items, total))
            })
            .await?;

        Ok(Page::new(items, total, request))
    }

    pub async fn get(&self, id: i64) -> Result<Review> {
        self.with_store(move |store| store.get_review(id))
            .await?
            .ok_or(Error::NotFound(id))
    }

    /// Reviews dated within `[start, end]` with per-sentiment counts.
    ///
    /// An inverted range is not an error; it simply matches nothing.
    pub async fn report(&self, start: NaiveDate, end: NaiveDate) -> Result<Report> {
        if end < start {
            debug!("Report range is inverted ({} > {}), no review can match", start, end);
        }
        let reviews = self
            .with_store(move |store| store.reviews_between(start, end))
            .await?;
        Ok(Report::from_reviews(reviews))
    }

    /// Totals per sentiment across every stored review
    pub async fn totals(&self) -> Result<SentimentCounts> {
        self.with_store(|store| store.sentiment_counts()).await
    }

    /// Administrative reset: drop and recreate the table
    pub async fn reset(&self) -> Result<()> {
        warn!("Resetting review store at {}", self.database.path().display());
        self.with_store(|store| store.reset()).await
    }

    async fn classify(&self, text: &str) -> Result<Classification> {
        match self.classifier.classify(text).await {
            Ok(classification) => Ok(classification),
            Err(e) => match self.fallback {
                Some(sentiment) => {
                    warn!(
                        "Classifier '{}' failed ({}), storing fallback sentiment {}",
                        self.classifier.name(),
                        e,
                        sentiment
                    );
                    Ok(Classification { sentiment, score: 0.0 })
                }
                None => Err(e),
            },
        }
    }

    /// Run `op` against a freshly opened store on the blocking pool.
    async fn with_store<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut ReviewStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let database = self.database.clone();
        tokio::task::spawn_blocking(move || {
            let mut store = database.open()?;
            op(&mut store)
        })
        .await?
    }
}
