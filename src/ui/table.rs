use crate::review::Sentiment;
use crate::storage::SentimentCounts;
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
pub struct SentimentRow {
    #[tabled(rename = "Sentiment")]
    pub sentiment: String,
    #[tabled(rename = "Reviews")]
    pub count: u64,
    #[tabled(rename = "Share")]
    pub share: String,
}

pub fn sentiment_rows(counts: &SentimentCounts) -> Vec<SentimentRow> {
    let total = counts.total();
    Sentiment::all()
        .iter()
        .map(|&sentiment| {
            let count = counts.get(sentiment);
            let share = if total == 0 {
                "-".to_string()
            } else {
                format!("{:.1}%", count as f64 * 100.0 / total as f64)
            };
            SentimentRow {
                sentiment: sentiment.as_str().to_string(),
                count,
                share,
            }
        })
        .collect()
}

pub fn sentiment_table(counts: &SentimentCounts) -> String {
    Table::new(sentiment_rows(counts)).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_category_order() {
        let counts = SentimentCounts {
            positive: 3,
            neutral: 0,
            negative: 1,
        };
        let rows = sentiment_rows(&counts);
        let labels: Vec<_> = rows.iter().map(|r| r.sentiment.as_str()).collect();
        assert_eq!(labels, ["positiva", "neutra", "negativa"]);
        assert_eq!(rows[0].share, "75.0%");
        assert_eq!(rows[1].share, "0.0%");
    }

    #[test]
    fn test_empty_counts_have_no_share() {
        let rows = sentiment_rows(&SentimentCounts::default());
        assert!(rows.iter().all(|r| r.share == "-"));
        assert!(sentiment_table(&SentimentCounts::default()).contains("negativa"));
    }
}
