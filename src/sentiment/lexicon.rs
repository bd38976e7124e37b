use super::{Classification, SentimentClassifier};
use crate::Result;
use crate::review::Sentiment;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Negation flips and dampens the next scored word within this many tokens.
const NEGATION_SPAN: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

/// Word polarities, Portuguese and English.
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("bom", 0.5),
    ("boa", 0.5),
    ("bem", 0.4),
    ("ótimo", 0.8),
    ("ótima", 0.8),
    ("excelente", 1.0),
    ("excelentes", 1.0),
    ("rápido", 0.4),
    ("rápida", 0.4),
    ("rapidez", 0.4),
    ("eficiente", 0.6),
    ("eficientes", 0.6),
    ("satisfeito", 0.6),
    ("satisfeita", 0.6),
    ("satisfatória", 0.4),
    ("satisfatório", 0.4),
    ("atenciosa", 0.5),
    ("atencioso", 0.5),
    ("prestativa", 0.6),
    ("prestativo", 0.6),
    ("dedicada", 0.4),
    ("dedicado", 0.4),
    ("adorei", 0.8),
    ("gostei", 0.6),
    ("educado", 0.4),
    ("educada", 0.4),
    ("respeitoso", 0.4),
    ("clareza", 0.4),
    ("clara", 0.3),
    ("prático", 0.4),
    ("resolvido", 0.4),
    ("resolveram", 0.4),
    ("superou", 0.7),
    ("qualidade", 0.5),
    ("agradeço", 0.4),
    ("recomendo", 0.7),
    ("perfeito", 1.0),
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("fast", 0.3),
    ("quick", 0.3),
    ("efficient", 0.5),
    ("helpful", 0.6),
    ("satisfied", 0.5),
    ("happy", 0.8),
    ("love", 0.5),
    ("loved", 0.7),
    ("amazing", 0.6),
    ("perfect", 1.0),
    ("friendly", 0.4),
    ("resolved", 0.4),
    // negative
    ("ruim", -0.7),
    ("péssimo", -1.0),
    ("péssima", -1.0),
    ("horrível", -1.0),
    ("demorado", -0.5),
    ("demorada", -0.5),
    ("demora", -0.4),
    ("despreparado", -0.6),
    ("despreparada", -0.6),
    ("decepcionado", -0.7),
    ("decepcionada", -0.7),
    ("insatisfeito", -0.6),
    ("insatisfeita", -0.6),
    ("frustrado", -0.6),
    ("frustrada", -0.6),
    ("infelizmente", -0.4),
    ("falha", -0.4),
    ("erro", -0.3),
    ("problema", -0.2),
    ("pior", -0.8),
    ("lento", -0.5),
    ("lenta", -0.5),
    ("mediana", -0.1),
    ("mediano", -0.1),
    ("bad", -0.7),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("worst", -1.0),
    ("slow", -0.3),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("frustrated", -0.7),
    ("unhelpful", -0.5),
    ("rude", -0.3),
    ("broken", -0.4),
];

/// Words that scale the next scored word.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("muito", 1.3),
    ("extremamente", 1.5),
    ("bastante", 1.2),
    ("super", 1.3),
    ("totalmente", 1.3),
    ("completamente", 1.3),
    ("very", 1.3),
    ("extremely", 1.5),
    ("really", 1.2),
    ("so", 1.2),
];

const NEGATORS: &[&str] = &[
    "não", "nao", "nunca", "nem", "sem", "nenhum", "nenhuma", "not", "no", "never", "without",
];

static WORDS: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| LEXICON.iter().copied().collect());

static MODIFIERS: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIERS.iter().copied().collect());

/// In-process polarity classifier.
///
/// Scores each lexicon word (scaled by a preceding intensifier, flipped by a
/// recent negator), averages the scores and maps the average through the
/// configured thresholds.
#[derive(Debug, Clone)]
pub struct LexiconClassifier {
    positive_threshold: f64,
    negative_threshold: f64,
}

impl LexiconClassifier {
    pub fn new(positive_threshold: f64, negative_threshold: f64) -> Self {
        Self {
            positive_threshold,
            negative_threshold,
        }
    }

    /// Average polarity of the text in `[-1.0, 1.0]`; 0.0 when no word is scored.
    pub fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut scores = Vec::new();
        let mut intensity = 1.0;
        let mut negation = 0usize;

        for token in lowered.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
            if NEGATORS.contains(&token) {
                negation = NEGATION_SPAN;
                continue;
            }
            if let Some(factor) = MODIFIERS.get(token) {
                intensity *= factor;
                continue;
            }

            match WORDS.get(token) {
                Some(polarity) => {
                    let mut score = (polarity * intensity).clamp(-1.0, 1.0);
                    if negation > 0 {
                        score *= NEGATION_FACTOR;
                        negation = 0;
                    }
                    scores.push(score);
                }
                None => negation = negation.saturating_sub(1),
            }
            intensity = 1.0;
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new(0.1, -0.1)
    }
}

#[async_trait]
impl SentimentClassifier for LexiconClassifier {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn classify(&self, text: &str) -> Result<Classification> {
        let polarity = self.polarity(text);
        let sentiment =
            Sentiment::from_polarity(polarity, self.positive_threshold, self.negative_threshold);
        tracing::debug!("lexicon polarity {:.3} -> {}", polarity, sentiment);
        Ok(Classification {
            sentiment,
            score: polarity,
        })
    }
}
