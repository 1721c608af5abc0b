use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::address_book::DEFAULT_NAME_WIDTH;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, strum::Display,
)]
#[clap(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OutputFormat {
    /// Aligned `<name> <address>` lines
    #[default]
    Text,
    Json,
    Yaml,
}

/// Prints the address of every contract created by a deployment broadcast,
/// once per contract name
#[derive(Debug, Clone, Parser)]
#[clap(rename_all = "kebab-case")]
pub struct Args {
    /// Path to the broadcast artifact
    ///
    /// Usually something like 'broadcast/Deploy.s.sol/<chain-id>/run-latest.json'
    #[clap(env = "BROADCAST_PATH")]
    pub broadcast: PathBuf,

    /// Minimum width of the contract name column
    #[clap(
        long,
        env = "BROADCAST_NAME_WIDTH",
        default_value_t = DEFAULT_NAME_WIDTH
    )]
    pub name_width: usize,

    /// What to print on stdout
    #[clap(short, long, env = "BROADCAST_FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Also write the addresses as YAML to this file
    #[clap(short, long, env = "BROADCAST_REPORT")]
    pub report: Option<PathBuf>,

    /// Log a warning for every record skipped because its contract name
    /// was already printed
    #[clap(long, env = "BROADCAST_WARN_DUPLICATES")]
    pub warn_duplicates: bool,
}
