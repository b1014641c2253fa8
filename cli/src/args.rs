//! Command line arguments for `breachwatch`.

use clap::Parser;
use std::path::PathBuf;

/// Breachwatch - query the public breach list
#[derive(Parser, Debug)]
#[command(name = "breachwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the XDG default
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Server to fetch the breach list from
    #[arg(long)]
    pub base_url: Option<String>,

    /// Path of the breach list endpoint
    #[arg(long)]
    pub path: Option<String>,

    /// Read the breach list from a local JSON file instead of fetching it
    #[arg(long, conflicts_with_all = ["base_url", "path"])]
    pub file: Option<PathBuf>,

    /// Validate every record against the breach schema
    #[arg(long)]
    pub validate: bool,

    /// Keep breaches with this name (repeatable)
    #[arg(long = "name")]
    pub names: Vec<String>,

    /// Keep breaches on exactly this domain ("" for breaches without one)
    #[arg(long, conflicts_with = "any_domain")]
    pub domain: Option<String>,

    /// Keep breaches that have a domain
    #[arg(long)]
    pub any_domain: bool,

    /// Keep breaches exposing this data class (repeatable, all must match)
    #[arg(long = "data-class")]
    pub data_classes: Vec<String>,

    /// Filter on IsVerified
    #[arg(long)]
    pub verified: Option<bool>,

    /// Filter on IsSensitive
    #[arg(long)]
    pub sensitive: Option<bool>,

    /// Filter on IsFabricated
    #[arg(long)]
    pub fabricated: Option<bool>,

    /// Filter on IsRetired
    #[arg(long)]
    pub retired: Option<bool>,

    /// Filter on IsSpamList
    #[arg(long)]
    pub spam_list: Option<bool>,

    /// Sort key, e.g. `PwnCount` or `-AddedDate` (defaults to the configured sort)
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Fields to keep, comma separated, e.g. `Name,PwnCount`
    #[arg(long, value_delimiter = ',')]
    pub pluck: Vec<String>,

    /// Print at most this many breaches (0 prints all)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
