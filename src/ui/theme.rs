use crate::review::Sentiment;
use owo_colors::{OwoColorize, Style};
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const CHECK: &str = "✅";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const BRAIN: &str = "🧠";
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub warn: Style,
    pub dim: Style,
    pub positive: Style,
    pub neutral: Style,
    pub negative: Style,
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            warn: Style::new().yellow().bold(),
            dim: Style::new().white().dimmed(),
            positive: Style::new().green(),
            neutral: Style::new().yellow(),
            negative: Style::new().red(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            warn: Style::new(),
            dim: Style::new(),
            positive: Style::new(),
            neutral: Style::new(),
            negative: Style::new(),
        }
    }

    pub fn for_sentiment(&self, sentiment: Sentiment) -> Style {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

/// Sentiment label styled with its category colour
pub fn sentiment_label(sentiment: Sentiment) -> String {
    sentiment
        .as_str()
        .style(theme().for_sentiment(sentiment))
        .to_string()
}
