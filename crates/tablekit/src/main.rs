//! tablekit CLI entry point.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tablekit::cli::Cli;
use tablekit::output::Printer;
use tablekit::{open_store, run_command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "tablekit=debug,tablekit_core=debug"
    } else {
        "tablekit=info,tablekit_core=info"
    };

    // Logs go to stderr so json output on stdout stays parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::info!(
        store = %cli.config.target_display(),
        table = %cli.config.table_name,
        "Starting tablekit"
    );

    let store = open_store(&cli.config)
        .await
        .context("Failed to open record store")?;

    let command = cli.command();
    run_command(
        store.as_ref(),
        &cli.config,
        Printer::new(cli.format),
        &command,
        chrono::Utc::now(),
    )
    .await?;

    Ok(())
}
