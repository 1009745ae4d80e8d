//! `emojifind` command-line entry point.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use emojifind_cli::assets::{read_text, AssetPaths, InputPaths};
use emojifind_cli::cli::{Cli, Command};
use emojifind_cli::commands::{run_index, run_prepare, run_search};
use emojifind_cli::describe::{describe_missing, DescribeOptions, OpenAiClient};
use emojifind_core::{read_records, Catalog};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emojifind=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let assets = AssetPaths::new(&cli.assets);

    match cli.command {
        Command::Prepare { input } => {
            let stats = run_prepare(&InputPaths::new(input), &assets)?;
            info!(
                exported = stats.exported,
                skipped = stats.skipped,
                "prepare finished"
            );
        }

        Command::Index => run_index(&assets)?,

        Command::Describe {
            api_key,
            endpoint,
            model,
            delay_ms,
            limit,
        } => {
            let client = OpenAiClient::new(api_key, endpoint, model)?;
            let records = read_records(&read_text(&assets.groups())?, &read_text(&assets.emoji())?)?;
            let catalog = Catalog::build(records);
            let options = DescribeOptions {
                delay: Duration::from_millis(delay_ms),
                limit,
            };
            let report = describe_missing(&catalog, &assets.descriptions(), &client, &options).await?;
            info!(
                written = report.written,
                existing = report.existing,
                failed = report.failed,
                "describe finished"
            );
        }

        Command::Search {
            query,
            tone,
            format,
            limit,
        } => {
            let lines = run_search(&assets, &query, tone, format, limit)?;
            if lines.is_empty() {
                println!("No results for {:?}", query.trim());
            }
            for line in lines {
                println!("{}  {}  {}", line.glyph, line.title, line.copied);
            }
        }
    }

    Ok(())
}
