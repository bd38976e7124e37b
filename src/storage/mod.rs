//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with one table:
//! - reviews(id, name, date, review, sentiment)
//!
//! Handles are short-lived: [`Database::open`] hands out an owned
//! [`ReviewStore`] and the connection closes when it is dropped.

pub mod schema;
pub mod sqlite;

pub use sqlite::{Database, ReviewStore, SentimentCounts};
