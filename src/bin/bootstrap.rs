use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use govdoin::bootstrap::{self, BootstrapPlan, MongoSchema};
use govdoin::config::RuntimeConfig;

#[derive(Parser)]
#[command(name = "govdoin-bootstrap")]
#[command(about = "Create the WhatTheGovDoin collections and unique indexes")]
#[command(version)]
struct Cli {
    /// Key-value config file (MONGO_URI, MONGO_DATABASE, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// MongoDB connection string, overrides the config
    #[arg(long)]
    uri: Option<String>,

    /// Database name, overrides the config
    #[arg(short, long)]
    database: Option<String>,

    /// Print the plan without connecting
    #[arg(long)]
    dry_run: bool,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = RuntimeConfig::from_env();
    if let Some(path) = &cli.config {
        let file = RuntimeConfig::from_file(path)
            .with_context(|| format!("reading {}", path.display()))?;
        config = config.merge(file);
    }
    let config = config.apply_overrides(cli.uri.as_deref(), cli.database.as_deref());

    let plan = BootstrapPlan::default();
    if cli.dry_run {
        for spec in &plan.collections {
            match &spec.unique_index {
                Some(field) => println!("{}.{} unique({})", config.mongo_database, spec.name, field),
                None => println!("{}.{}", config.mongo_database, spec.name),
            }
        }
        return Ok(());
    }

    let schema = MongoSchema::connect(&config)
        .await
        .context("connecting to MongoDB")?;
    let report = bootstrap::run(&schema, &plan)
        .await
        .context("applying bootstrap plan")?;

    if report.is_noop() {
        tracing::info!("Schema already up to date");
    } else {
        tracing::info!(
            collections = report.created_collections.len(),
            indexes = report.created_indexes.len(),
            "Schema bootstrapped"
        );
    }
    Ok(())
}
