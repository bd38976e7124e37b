//! Reviewsense CLI - serve the review API and administer its store

use anyhow::Context;
use clap::{Parser, Subcommand};
use reviewsense::config::{self, ReviewsenseConfig};
use reviewsense::sentiment::create_classifier;
use reviewsense::storage::Database;
use reviewsense::{ReviewService, ui};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "reviewsense")]
#[command(version)]
#[command(about = "Customer review service with sentiment tagging")]
#[command(long_about = r#"
Reviewsense stores customer reviews and tags each one with a sentiment
(positiva, neutra, negativa) when it is created.

Example usage:
  reviewsense init
  reviewsense serve --bind 127.0.0.1:8000
  reviewsense classify "O atendimento foi excelente"
  reviewsense stats
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Drop and recreate the reviews table
    ResetDb {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Confirm that every stored review will be deleted
        #[arg(long)]
        yes: bool,
    },

    /// Classify a piece of text with the configured classifier
    Classify {
        /// Text to classify
        text: String,
    },

    /// Show review totals per sentiment
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let settings = config::load_config(Some(&config_path))
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?
        .unwrap_or_default();
    if !matches!(cli.command, Commands::Init { .. }) {
        settings.validate()?;
    }

    match cli.command {
        Commands::Serve { bind, database } => {
            let addr = match bind {
                Some(addr) => addr,
                None => settings
                    .server
                    .bind
                    .parse()
                    .with_context(|| format!("Invalid server.bind '{}'", settings.server.bind))?,
            };
            let service = build_service(&settings, database)?;

            tracing::info!(
                "Serving reviews from {:?} on {}",
                service.database().path(),
                addr
            );
            reviewsense::server::start_server(addr, service).await?;
        }

        Commands::Init { force } => {
            let defaults = ReviewsenseConfig::default();
            config::write_config(&config_path, &defaults, force)?;
            ui::success(&format!("Wrote default config to {}", config_path.display()));
        }

        Commands::ResetDb { database, yes } => {
            let service = build_service(&settings, database)?;
            let path = service.database().path().display().to_string();

            if !yes {
                ui::warn(&format!(
                    "This deletes every review in {}. Re-run with --yes to proceed.",
                    path
                ));
                return Ok(());
            }

            service.reset().await?;
            ui::success(&format!("Recreated review tables in {}", path));
        }

        Commands::Classify { text } => {
            let classifier = create_classifier(&settings.classifier)?;
            ui::info("Classifier", classifier.name());
            let result = classifier.classify(&text).await?;
            ui::classification(&result);
        }

        Commands::Stats { database } => {
            let service = build_service(&settings, database)?;
            let totals = service.totals().await?;

            ui::header(&format!("Reviewsense Statistics ({:?})", service.database().path()));
            println!("{}", ui::sentiment_table(&totals));
            ui::info("Total reviews", &totals.total().to_string());
        }
    }

    Ok(())
}

/// Wire the service from config, with an optional database path override
fn build_service(settings: &ReviewsenseConfig, database: Option<PathBuf>) -> anyhow::Result<ReviewService> {
    let db_path = database.unwrap_or_else(|| settings.database.path.clone());
    config::ensure_db_dir(&db_path)?;

    let classifier = create_classifier(&settings.classifier)?;
    tracing::debug!("Using '{}' sentiment classifier", classifier.name());

    Ok(ReviewService::new(Database::new(db_path), classifier)
        .with_fallback(settings.classifier.fallback_sentiment)
        .with_default_page_size(settings.server.default_page_size))
}
