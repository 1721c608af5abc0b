use std::io::{IsTerminal, Write};

use address_book::{AddressBook, DuplicateRecord};
use broadcast::Broadcast;
use clap::Parser;
use cli::Args;
use color_eyre::config::HookBuilder;
use eyre::WrapErr;
use tracing::instrument;
use tracing_error::ErrorLayer;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub mod address_book;
pub mod broadcast;
pub mod error;
pub mod serde_utils;

mod cli;

#[instrument(skip_all, fields(broadcast = %args.broadcast.display()))]
async fn run<W: Write>(args: &Args, out: &mut W) -> eyre::Result<()> {
    let broadcast = Broadcast::load(&args.broadcast).await?;

    let (address_book, duplicates) =
        AddressBook::from_records(&broadcast.transactions);

    tracing::info!(
        records = broadcast.transactions.len(),
        contracts = address_book.len(),
        duplicates = duplicates.len(),
        "Extracted contract addresses"
    );

    if address_book.is_empty() {
        tracing::info!("Broadcast contains no contract deployments");
    }

    report_duplicates(&address_book, &duplicates, args.warn_duplicates);

    address_book
        .write_formatted(out, args.format, args.name_width)
        .wrap_err_with(|| format!("Writing {} output", args.format))?;
    out.flush()?;

    if let Some(report) = &args.report {
        serde_utils::write_serialize(report, &address_book).await?;
        tracing::info!(path = %report.display(), "Wrote address report");
    }

    Ok(())
}

fn report_duplicates(
    address_book: &AddressBook,
    duplicates: &[DuplicateRecord],
    warn: bool,
) {
    for duplicate in duplicates {
        let kept = address_book
            .get(&duplicate.contract_name)
            .unwrap_or_default();

        if warn {
            tracing::warn!(
                index = duplicate.index,
                name = %duplicate.contract_name,
                skipped = %duplicate.contract_address,
                kept,
                "Skipping duplicate contract name"
            );
        } else {
            tracing::debug!(
                index = duplicate.index,
                name = %duplicate.contract_name,
                skipped = %duplicate.contract_address,
                kept,
                "Skipping duplicate contract name"
            );
        }
    }
}

/// `RUST_LOG` style directives, defaulting to `warn`.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

/// Colored reports only when stderr is a terminal.
fn error_hook(color: bool) -> HookBuilder {
    if color {
        HookBuilder::default()
    } else {
        HookBuilder::blank()
    }
}

async fn start() -> eyre::Result<()> {
    let args = Args::parse();

    let mut stdout = std::io::stdout().lock();

    run(&args, &mut stdout).await
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    error_hook(std::io::stderr().is_terminal()).install()?;

    dotenv::dotenv().ok();

    let indicatif_layer = IndicatifLayer::new();

    let filter = log_filter(
        &std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default(),
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_filter(filter),
        )
        .with(indicatif_layer)
        .with(ErrorLayer::default())
        .init();

    match start().await {
        Ok(()) => Ok(()),
        Err(err) => {
            eprintln!("Error: {err:?}");
            std::process::exit(1)
        }
    }
}
