//! `breachwatch` - thin command line driver for the breach collection.
//!
//! Loads configuration, fetches the list once, applies the filters given on
//! the command line in a fixed order and prints the result as JSON.

mod args;

use anyhow::{Context, Result};
use args::Cli;
use breachwatch_collection::{
    BreachCollection, BreachSource, HttpSource, LoadOptions, SortKey, StaticSource,
};
use breachwatch_core::{AppConfig, BreachField, Row};
use clap::Parser;
use tracing::info;

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,breachwatch=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = AppConfig::load_from(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            config.apply_env();
            config
        }
        None => AppConfig::load_with_env().context("loading config")?,
    };

    if let Some(base_url) = &cli.base_url {
        config.source.base_url.clone_from(base_url);
    }
    if let Some(path) = &cli.path {
        config.source.path.clone_from(path);
    }
    if cli.validate {
        config.query.validate = true;
    }
    Ok(config)
}

/// Apply the command line filters, sort and projection, then end the chain.
fn run_query(
    collection: &mut BreachCollection,
    cli: &Cli,
    config: &AppConfig,
) -> Result<Vec<Row>> {
    if !cli.names.is_empty() {
        collection.by_name(&cli.names);
    }
    if let Some(domain) = &cli.domain {
        collection.by_domain(Some(domain));
    } else if cli.any_domain {
        collection.by_domain(None);
    }
    collection.by_data_class(&cli.data_classes);

    let flags = [
        (BreachField::IsVerified, cli.verified),
        (BreachField::IsSensitive, cli.sensitive),
        (BreachField::IsFabricated, cli.fabricated),
        (BreachField::IsRetired, cli.retired),
        (BreachField::IsSpamList, cli.spam_list),
    ];
    for (field, expected) in flags {
        if let Some(expected) = expected {
            collection.by_flag(field, expected);
        }
    }

    let sort = cli.sort.as_deref().unwrap_or(&config.query.default_sort);
    if !sort.is_empty() {
        let key: SortKey = sort
            .parse()
            .with_context(|| format!("invalid sort key '{sort}'"))?;
        collection.sort(key);
    }

    if !cli.pluck.is_empty() {
        let fields = cli
            .pluck
            .iter()
            .map(|name| name.trim().parse::<BreachField>())
            .collect::<Result<Vec<_>, _>>()
            .context("invalid --pluck field")?;
        collection.pluck(&fields);
    }

    Ok(collection.breaches(cli.limit))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    info!("Starting Breachwatch v{}", env!("CARGO_PKG_VERSION"));

    let source: Box<dyn BreachSource> = match &cli.file {
        Some(path) => Box::new(StaticSource::from_path(path)?),
        None => Box::new(HttpSource::new(&config.source)?),
    };
    let options = LoadOptions::validated(config.query.validate);

    let mut collection = BreachCollection::load(source.as_ref(), &options)
        .await
        .with_context(|| format!("loading breaches from {}", source.describe()))?;

    let rows = run_query(&mut collection, &cli, &config)?;
    info!(count = rows.len(), "query complete");

    let output = if cli.pretty {
        serde_json::to_string_pretty(&rows)?
    } else {
        serde_json::to_string(&rows)?
    };
    println!("{output}");

    Ok(())
}
