//! Review types
//!
//! A review is the only persisted entity. Its sentiment is computed once when
//! the review is created and stored alongside the text.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Earliest and latest years a review date may carry. Dates are stored as
/// `YYYY-MM-DD` text and range queries compare that text, which only orders
/// correctly for four-digit years.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Canonical sentiment categories.
///
/// On the wire these use the labels the reports are keyed by
/// (`positiva`, `negativa`, `neutra`); English spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "positiva", alias = "positive")]
    Positive,
    #[serde(rename = "negativa", alias = "negative")]
    Negative,
    #[serde(rename = "neutra", alias = "neutral")]
    Neutral,
}

impl Sentiment {
    /// Stored and serialized label
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positiva",
            Sentiment::Negative => "negativa",
            Sentiment::Neutral => "neutra",
        }
    }

    pub fn all() -> &'static [Sentiment] {
        &[Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative]
    }

    /// Map a polarity score onto a category.
    ///
    /// Scores strictly above `positive` are positive, scores at or below
    /// `negative` are negative, everything in between is neutral.
    pub fn from_polarity(polarity: f64, positive: f64, negative: f64) -> Self {
        if polarity > positive {
            Sentiment::Positive
        } else if polarity <= negative {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl FromStr for Sentiment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "positiva" | "positivo" | "positive" | "pos" => Ok(Sentiment::Positive),
            "negativa" | "negativo" | "negative" | "neg" => Ok(Sentiment::Negative),
            "neutra" | "neutro" | "neutral" | "neu" => Ok(Sentiment::Neutral),
            _ => Err(Error::Validation(format!("Unknown sentiment: {}", s))),
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Assigned by the store on insert
    pub id: i64,
    /// Author of the review
    pub name: String,
    /// Day the review was made
    pub date: NaiveDate,
    /// Review text
    pub review: String,
    pub sentiment: Sentiment,
}

/// Input for creating a review. Sentiment and id are filled in later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub name: String,
    pub date: NaiveDate,
    pub review: String,
}

impl NewReview {
    pub fn new(name: impl Into<String>, date: NaiveDate, review: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date,
            review: review.into(),
        }
    }

    /// Reject blank author or text before any side effect happens.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("name must not be empty".to_string()));
        }
        if self.review.trim().is_empty() {
            return Err(Error::Validation("review must not be empty".to_string()));
        }
        check_year("date", self.date)
    }

    /// Attach the store-assigned id and the classified sentiment
    pub fn into_review(self, id: i64, sentiment: Sentiment) -> Review {
        Review {
            id,
            name: self.name,
            date: self.date,
            review: self.review,
            sentiment,
        }
    }
}

/// Parse a `YYYY-MM-DD` date, naming the offending field on failure.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        Error::Validation(format!(
            "{} must be a date formatted as YYYY-MM-DD, got '{}': {}",
            field, value, e
        ))
    })?;
    check_year(field, date)?;
    Ok(date)
}

fn check_year(field: &str, date: NaiveDate) -> Result<()> {
    use chrono::Datelike;

    if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "{} year must be between {} and {}, got {}",
            field, MIN_YEAR, MAX_YEAR, date
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_thresholds() {
        assert_eq!(Sentiment::from_polarity(0.11, 0.1, -0.1), Sentiment::Positive);
        assert_eq!(Sentiment::from_polarity(0.1, 0.1, -0.1), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(0.0, 0.1, -0.1), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(-0.1, 0.1, -0.1), Sentiment::Negative);
        assert_eq!(Sentiment::from_polarity(-0.9, 0.1, -0.1), Sentiment::Negative);
    }

    #[test]
    fn test_sentiment_labels() {
        assert_eq!("positive".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert_eq!("NEUTRA".parse::<Sentiment>().unwrap(), Sentiment::Neutral);
        assert!("mixed".parse::<Sentiment>().is_err());

        let json = serde_json::to_string(&Sentiment::Negative).unwrap();
        assert_eq!(json, "\"negativa\"");
        let parsed: Sentiment = serde_json::from_str("\"neutral\"").unwrap();
        assert_eq!(parsed, Sentiment::Neutral);
    }

    #[test]
    fn test_review_json_shape() {
        let review = NewReview::new("Ana Silva", NaiveDate::from_ymd_opt(2024, 8, 7).unwrap(), "Bom")
            .into_review(3, Sentiment::Positive);
        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["date"], "2024-08-07");
        assert_eq!(value["sentiment"], "positiva");
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(NewReview::new("  ", date, "texto").validate().is_err());
        assert!(NewReview::new("Ana", date, "").validate().is_err());
        assert!(NewReview::new("Ana", date, "texto").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_years_outside_four_digits() {
        let far = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        let err = NewReview::new("Ana", far, "texto").validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("date"));

        let year_zero = NaiveDate::from_ymd_opt(0, 12, 31).unwrap();
        assert!(NewReview::new("Ana", year_zero, "texto").validate().is_err());

        let last = NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).unwrap();
        assert!(NewReview::new("Ana", last, "texto").validate().is_ok());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("start_date", "2024-09-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 15).unwrap()
        );
        let err = parse_date("start_date", "15/09/2024").unwrap_err();
        assert!(err.to_string().contains("start_date"));
    }

    #[test]
    fn test_parse_date_rejects_extended_years() {
        let err = parse_date("end_date", "+20000-01-01").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("end_date"));

        assert!(parse_date("start_date", "0000-01-01").is_err());
        assert_eq!(
            parse_date("start_date", "0001-01-01").unwrap(),
            NaiveDate::from_ymd_opt(1, 1, 1).unwrap()
        );
    }
}
