//! SQLite storage implementation

use super::schema;
use crate::review::{NewReview, Review, Sentiment};
use crate::{Error, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

const REVIEW_COLUMNS: &str = "id, name, date, review, sentiment";

/// Where the review database lives.
///
/// Cheap to clone and holds no connection; every caller opens its own
/// [`ReviewStore`] and drops it when done.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire a fresh handle. The connection is released when the store drops.
    pub fn open(&self) -> Result<ReviewStore> {
        ReviewStore::open(&self.path)
    }
}

/// SQLite-backed storage for reviews
pub struct ReviewStore {
    conn: Connection,
}

impl ReviewStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Write Operations ==========

    /// Insert a review and return it with its assigned id.
    ///
    /// Runs in its own transaction; any failure rolls the insert back.
    pub fn insert_review(&mut self, new: &NewReview, sentiment: Sentiment) -> Result<Review> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO reviews (name, date, review, sentiment) VALUES (?1, ?2, ?3, ?4)",
            params![new.name, new.date, new.review, sentiment.as_str()],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(new.clone().into_review(id, sentiment))
    }

    /// Drop and recreate every table. Administrative only.
    pub fn reset(&self) -> Result<()> {
        for stmt in schema::DROP_TABLES {
            self.conn.execute(stmt, [])?;
        }
        self.initialize_schema()
    }

    // ========== Read Operations ==========

    /// Get a review by id
    pub fn get_review(&self, id: i64) -> Result<Option<Review>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM reviews WHERE id = ?1", REVIEW_COLUMNS),
                [id],
                row_to_review,
            )
            .optional()
            .map_err(Into::into)
    }

    /// One page of reviews in insertion order
    pub fn list_reviews(&self, limit: u64, offset: u64) -> Result<Vec<Review>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM reviews ORDER BY id LIMIT ?1 OFFSET ?2",
            REVIEW_COLUMNS
        ))?;

        let reviews = stmt
            .query_map(params![to_sql_int(limit), to_sql_int(offset)], row_to_review)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(reviews)
    }

    /// Reviews dated within `[start, end]`, both bounds inclusive
    pub fn reviews_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Review>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM reviews WHERE date BETWEEN ?1 AND ?2 ORDER BY id",
            REVIEW_COLUMNS
        ))?;

        let reviews = stmt
            .query_map(params![start, end], row_to_review)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(reviews)
    }

    /// Count all reviews
    pub fn count_reviews(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reviews", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Per-sentiment totals across the whole table
    pub fn sentiment_counts(&self) -> Result<SentimentCounts> {
        let mut stmt = self
            .conn
            .prepare("SELECT sentiment, COUNT(*) FROM reviews GROUP BY sentiment")?;

        let rows = stmt
            .query_map([], |row| {
                let label: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((label, count))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut counts = SentimentCounts::default();
        for (label, count) in rows {
            let sentiment: Sentiment = label.parse()?;
            counts.add(sentiment, count as u64);
        }
        Ok(counts)
    }
}

/// Helper to convert a row to a Review
fn row_to_review(row: &rusqlite::Row) -> rusqlite::Result<Review> {
    let sentiment_str: String = row.get(4)?;
    let sentiment: Sentiment = sentiment_str.parse().map_err(|e: Error| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Review {
        id: row.get(0)?,
        name: row.get(1)?,
        date: row.get(2)?,
        review: row.get(3)?,
        sentiment,
    })
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Tally of reviews per sentiment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
}

impl SentimentCounts {
    pub fn add(&mut self, sentiment: Sentiment, n: u64) {
        match sentiment {
            Sentiment::Positive => self.positive += n,
            Sentiment::Neutral => self.neutral += n,
            Sentiment::Negative => self.negative += n,
        }
    }

    pub fn get(&self, sentiment: Sentiment) -> u64 {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn total(&self) -> u64 {
        self.positive + self.neutral + self.negative
    }
}

impl<'a> FromIterator<&'a Review> for SentimentCounts {
    fn from_iter<I: IntoIterator<Item = &'a Review>>(iter: I) -> Self {
        let mut counts = Self::default();
        for review in iter {
            counts.add(review.sentiment, 1);
        }
        counts
    }
}

impl std::fmt::Display for SentimentCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Review Statistics:")?;
        writeln!(f, "  Positive: {}", self.positive)?;
        writeln!(f, "  Neutral: {}", self.neutral)?;
        writeln!(f, "  Negative: {}", self.negative)?;
        write!(f, "  Total: {}", self.total())
    }
}
