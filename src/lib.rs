//! # Reviewsense - customer review service
//!
//! Stores customer reviews, tags each one with a sentiment label when it is
//! created, and serves paginated listings and date-range reports.
//!
//! Reviewsense provides:
//! - A review model with three canonical sentiment categories
//! - SQLite-backed storage with per-request handles
//! - Pluggable sentiment classifiers (local lexicon or remote model endpoint)
//! - A review service that orchestrates classification, paging and reports
//! - An axum HTTP API over the service

pub mod config;
pub mod review;
pub mod sentiment;
pub mod server;
pub mod service;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use review::{NewReview, Review, Sentiment};
pub use sentiment::{Classification, SentimentClassifier};
pub use service::{Page, PageRequest, Report, ReviewService};
pub use storage::{Database, ReviewStore};

/// Result type alias for Reviewsense operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Reviewsense operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Review not found: {0}")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
