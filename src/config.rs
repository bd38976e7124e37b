use crate::review::Sentiment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReviewsenseConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub default_page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierProvider {
    #[default]
    Lexicon,
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub provider: ClassifierProvider,
    pub positive_threshold: f64,
    pub negative_threshold: f64,
    /// Stored instead of failing the create when the classifier errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Raw model label -> category
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, Sentiment>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            provider: ClassifierProvider::Lexicon,
            positive_threshold: 0.1,
            negative_threshold: -0.1,
            fallback_sentiment: None,
            url: None,
            api_key: None,
            timeout_secs: None,
            labels: BTreeMap::new(),
        }
    }
}

impl ReviewsenseConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.default_page_size == 0 {
            anyhow::bail!("server.default_page_size must be at least 1");
        }
        let classifier = &self.classifier;
        if classifier.negative_threshold > classifier.positive_threshold {
            anyhow::bail!(
                "classifier.negative_threshold ({}) must not exceed classifier.positive_threshold ({})",
                classifier.negative_threshold,
                classifier.positive_threshold
            );
        }
        if classifier.provider == ClassifierProvider::Remote && classifier.url.is_none() {
            anyhow::bail!("classifier.url is required when classifier.provider = \"remote\"");
        }
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("reviewsense.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from(".reviewsense").join("reviews.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ReviewsenseConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ReviewsenseConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &ReviewsenseConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviewsense.toml");
        std::fs::write(
            &path,
            r#"
[classifier]
provider = "remote"
url = "http://localhost:9000/classify"
fallback_sentiment = "neutra"

[classifier.labels]
LABEL_0 = "negativa"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert_eq!(config.server.default_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.classifier.provider, ClassifierProvider::Remote);
        assert_eq!(config.classifier.fallback_sentiment, Some(Sentiment::Neutral));
        assert_eq!(config.classifier.labels["LABEL_0"], Sentiment::Negative);
        assert_eq!(config.classifier.positive_threshold, 0.1);
        config.validate().unwrap();
    }

    #[test]
    fn test_write_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviewsense.toml");
        let config = ReviewsenseConfig::default();

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database.path, default_database_path());
        assert_eq!(loaded.classifier.provider, ClassifierProvider::Lexicon);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ReviewsenseConfig::default();
        config.server.default_page_size = 0;
        assert!(config.validate().is_err());

        let mut config = ReviewsenseConfig::default();
        config.classifier.negative_threshold = 0.5;
        assert!(config.validate().is_err());

        let mut config = ReviewsenseConfig::default();
        config.classifier.provider = ClassifierProvider::Remote;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("reviews.db");
        ensure_db_dir(&db_path).unwrap();
        assert!(db_path.parent().unwrap().is_dir());
    }
}
