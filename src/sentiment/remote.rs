use super::{Classification, SentimentClassifier};
use crate::review::Sentiment;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::info;

/// Client for a text-classification model served over HTTP.
///
/// Sends `{"inputs": text}` and accepts the usual inference-server shapes,
/// either `[{label, score}, ...]` or `[[{label, score}, ...]]`.
pub struct RemoteClassifier {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    labels: HashMap<String, Sentiment>,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassifyResponse {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            ClassifyResponse::Nested(batches) => batches.into_iter().flatten().collect(),
            ClassifyResponse::Flat(scores) => scores,
        }
    }
}

impl RemoteClassifier {
    /// `labels` overrides the built-in label mapping; keys match case-insensitively.
    pub fn new(
        url: &str,
        api_key: Option<String>,
        timeout: Option<Duration>,
        labels: &BTreeMap<String, Sentiment>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Classifier(format!("Failed to build HTTP client: {}", e)))?;

        info!("Remote sentiment classifier initialized ({})", url);
        Ok(Self {
            client,
            url: url.to_string(),
            api_key,
            labels: labels
                .iter()
                .map(|(label, sentiment)| (label.trim().to_lowercase(), *sentiment))
                .collect(),
        })
    }

    /// Map a raw model label onto a canonical category.
    pub fn map_label(&self, label: &str) -> Result<Sentiment> {
        let key = label.trim().to_lowercase();
        if let Some(sentiment) = self.labels.get(&key) {
            return Ok(*sentiment);
        }
        builtin_label(&key)
            .ok_or_else(|| Error::Classifier(format!("Unmapped classifier label: {}", label)))
    }
}

/// Labels emitted by common sentiment models
fn builtin_label(label: &str) -> Option<Sentiment> {
    match label {
        "label_2" | "4 stars" | "5 stars" => Some(Sentiment::Positive),
        "label_1" | "3 stars" => Some(Sentiment::Neutral),
        "label_0" | "1 star" | "2 stars" => Some(Sentiment::Negative),
        other => other.parse().ok(),
    }
}

#[async_trait]
impl SentimentClassifier for RemoteClassifier {
    fn name(&self) -> &str {
        "remote"
    }

    async fn classify(&self, text: &str) -> Result<Classification> {
        let body = serde_json::json!({ "inputs": text });

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| Error::Classifier(format!("Request to {} failed: {}", self.url, e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Classifier(format!(
                "Classifier API error: {} {}",
                status, body
            )));
        }

        let data: ClassifyResponse = resp
            .json()
            .await
            .map_err(|e| Error::Classifier(format!("Failed to parse classifier response: {}", e)))?;

        let best = data
            .into_scores()
            .into_iter()
            .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
            .ok_or_else(|| Error::Classifier("Classifier returned no labels".to_string()))?;

        Ok(Classification {
            sentiment: self.map_label(&best.label)?,
            score: best.score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/classify", addr)
    }

    fn classifier(url: &str, labels: &[(&str, Sentiment)]) -> RemoteClassifier {
        let labels = labels.iter().map(|(l, s)| (l.to_string(), *s)).collect();
        RemoteClassifier::new(url, None, Some(Duration::from_secs(5)), &labels).unwrap()
    }

    #[test]
    fn test_builtin_labels() {
        let c = classifier("http://localhost/unused", &[]);
        assert_eq!(c.map_label("POSITIVE").unwrap(), Sentiment::Positive);
        assert_eq!(c.map_label("LABEL_0").unwrap(), Sentiment::Negative);
        assert_eq!(c.map_label("3 stars").unwrap(), Sentiment::Neutral);
        assert!(c.map_label("mixed").is_err());
    }

    #[test]
    fn test_label_overrides_win() {
        let c = classifier("http://localhost/unused", &[("LABEL_0", Sentiment::Positive)]);
        assert_eq!(c.map_label("label_0").unwrap(), Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_classify_nested_response() {
        let app = Router::new().route(
            "/classify",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["inputs"], "ótimo atendimento");
                Json(serde_json::json!([[
                    { "label": "NEGATIVE", "score": 0.05 },
                    { "label": "POSITIVE", "score": 0.93 },
                    { "label": "NEUTRAL", "score": 0.02 }
                ]]))
            }),
        );
        let url = serve(app).await;

        let result = classifier(&url, &[]).classify("ótimo atendimento").await.unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert!((result.score - 0.93).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_classify_flat_response() {
        let app = Router::new().route(
            "/classify",
            post(|| async { Json(serde_json::json!([{ "label": "negativa", "score": 0.8 }])) }),
        );
        let url = serve(app).await;

        let result = classifier(&url, &[]).classify("ruim").await.unwrap();
        assert_eq!(result.sentiment, Sentiment::Negative);
    }

    #[tokio::test]
    async fn test_server_error_is_classifier_error() {
        let app = Router::new().route(
            "/classify",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model loading") }),
        );
        let url = serve(app).await;

        let err = classifier(&url, &[]).classify("texto").await.unwrap_err();
        assert!(matches!(err, Error::Classifier(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_empty_response_is_error() {
        let app = Router::new().route("/classify", post(|| async { Json(serde_json::json!([])) }));
        let url = serve(app).await;

        let err = classifier(&url, &[]).classify("texto").await.unwrap_err();
        assert!(matches!(err, Error::Classifier(_)));
    }
}
