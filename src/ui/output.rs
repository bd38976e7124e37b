use crate::sentiment::Classification;
use crate::ui::{Icons, sentiment_label, theme};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::ROCKET, text.style(theme().header));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn));
}

pub fn info(label: &str, value: &str) {
    println!("{} {}: {}", Icons::INFO, label.style(theme().dim), value);
}

pub fn classification(result: &Classification) {
    println!(
        "{} Sentiment: {} (score: {:.3})",
        Icons::BRAIN,
        sentiment_label(result.sentiment),
        result.score
    );
}
