use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use realty_content::content::SanityClient;
use realty_content::models::DocumentType;
use realty_content::schemas::Schema;
use realty_content::text::{deslug, format_price, slugify};
use realty_content::{Loaders, Router, SiteConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "realty-content", about = "Listings and blog content for the homes site")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a page path (e.g. /homes/tx/austin) and print its view-model
    Route { path: String },
    /// Print the slug generated for an address or title
    Slugify { text: String },
    /// Print the display name for a URL segment
    Deslug { slug: String },
    /// Format an amount as a listing price
    Price { amount: f64 },
    /// Print a document schema as JSON
    Schema { doc_type: DocType },
    /// Check a JSON document against its schema
    Validate { doc_type: DocType, file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum DocType {
    Home,
    BlogPost,
}

impl From<DocType> for DocumentType {
    fn from(value: DocType) -> Self {
        match value {
            DocType::Home => DocumentType::Home,
            DocType::BlogPost => DocumentType::BlogPost,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Route { path } => {
            let config = SiteConfig::from_env()?;
            info!(project = %config.project_id, dataset = %config.dataset, cdn = config.use_cdn, "Loaded site config");

            let client = SanityClient::new(&config).context("Failed to create content client")?;
            let loaders = Loaders::new(Arc::new(client), &config);
            let router = Router::new(loaders, &config);

            let response = router.handle(&path).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Slugify { text } => println!("{}", slugify(&text)),
        Command::Deslug { slug } => println!("{}", deslug(&slug)),
        Command::Price { amount } => println!("{}", format_price(amount)),
        Command::Schema { doc_type } => {
            let schema = Schema::for_type(doc_type.into());
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Validate { doc_type, file } => {
            let raw = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let document: serde_json::Value =
                serde_json::from_str(&raw).context("Document is not valid JSON")?;

            let schema = Schema::for_type(doc_type.into());
            let failures = schema.validate(&document);
            if failures.is_empty() {
                let preview = schema.preview(&document);
                println!("✅ Valid {}: {} ({})", schema.name, preview.title, preview.subtitle);
            } else {
                for failure in &failures {
                    println!("❌ {}", failure);
                }
                anyhow::bail!("{} validation failure(s)", failures.len());
            }
        }
    }

    Ok(())
}
