//! Librarian - Library Management command-line tool

use anyhow::Context;
use tokio::io::BufReader;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use librarian::{cli::Shell, config::LoggingConfig, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let _guard = init_tracing(&config.logging);

    tracing::info!("Starting Librarian v{}", env!("CARGO_PKG_VERSION"));

    let services = librarian::open(&config)
        .await
        .context("Failed to open database")?;

    tracing::info!(
        "Database ready: {} members, {} books, {} open borrows",
        services.members.count().await?,
        services.catalog.count().await?,
        services.loans.count_open().await?
    );

    let mut shell = Shell::new(
        services,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );
    shell.run().await?;

    tracing::info!("Goodbye");
    Ok(())
}

/// Logs go to stderr, or to a daily-rolling file when a directory is
/// configured, so they never interleave with the menu on stdout.
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("librarian={}", logging.level).into());

    let (writer, guard) = match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "librarian.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (tracing_subscriber::fmt::writer::BoxMakeWriter::new(writer), Some(guard))
        }
        None => (
            tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stderr),
            None,
        ),
    };

    let fmt_layer = if logging.format == "json" {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(writer).boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    guard
}
