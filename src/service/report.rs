use crate::review::Review;
use crate::storage::SentimentCounts;
use serde::{Deserialize, Serialize};

/// Reviews in a date range with their per-sentiment tallies.
///
/// Serialized keys follow the stored label vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub reviews: Vec<Review>,
    #[serde(rename = "positiva")]
    pub positive: u64,
    #[serde(rename = "neutra")]
    pub neutral: u64,
    #[serde(rename = "negativa")]
    pub negative: u64,
}

impl Report {
    pub fn from_reviews(reviews: Vec<Review>) -> Self {
        let counts: SentimentCounts = reviews.iter().collect();
        Self {
            reviews,
            positive: counts.positive,
            neutral: counts.neutral,
            negative: counts.negative,
        }
    }

    pub fn counts(&self) -> SentimentCounts {
        SentimentCounts {
            positive: self.positive,
            neutral: self.neutral,
            negative: self.negative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{NewReview, Sentiment};
    use chrono::NaiveDate;

    fn review(id: i64, sentiment: Sentiment) -> Review {
        NewReview::new("x", NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(), "texto")
            .into_review(id, sentiment)
    }

    #[test]
    fn test_empty_report() {
        let report = Report::from_reviews(Vec::new());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "reviews": [], "positiva": 0, "neutra": 0, "negativa": 0 })
        );
    }

    #[test]
    fn test_counts_cover_every_review() {
        let report = Report::from_reviews(vec![
            review(1, Sentiment::Positive),
            review(2, Sentiment::Negative),
            review(3, Sentiment::Positive),
            review(4, Sentiment::Neutral),
        ]);
        assert_eq!(report.positive, 2);
        assert_eq!(report.neutral, 1);
        assert_eq!(report.negative, 1);
        assert_eq!(report.counts().total(), report.reviews.len() as u64);
    }
}
