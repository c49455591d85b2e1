//! Command-line arguments.

use std::path::PathBuf;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;

#[derive(Debug, Parser)]
#[command(
    name = "mero",
    version,
    about = "Search, filter, sort, group and paginate JSON records"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of the cache directory.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive and print a view of a record file.
    View(ViewArgs),

    /// Print the field descriptors inferred from a record file.
    Fields(FieldsArgs),
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// JSON file holding an array of flat objects.
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,

    /// JSON file with field descriptors and a saved query.
    #[arg(long = "query", value_name = "FILE")]
    pub query: Option<PathBuf>,

    /// Case-insensitive search across all fields.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Keep records whose field contains the value. Repeatable.
    #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Field to sort by.
    #[arg(long = "sort", value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long = "desc")]
    pub desc: bool,

    /// Field to group by.
    #[arg(long = "group", value_name = "FIELD")]
    pub group: Option<String>,

    /// Group into date buckets (Today, Yesterday, ...) instead of by value.
    #[arg(long = "by-date", requires = "group")]
    pub by_date: bool,

    /// strftime format for dated group labels.
    #[arg(long = "date-format", value_name = "FORMAT")]
    pub date_format: Option<String>,

    /// Page to show (1-based).
    #[arg(long = "page", value_name = "N")]
    pub page: Option<usize>,

    /// Records per page.
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,

    /// Print the view as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct FieldsArgs {
    /// JSON file holding an array of flat objects.
    #[arg(value_name = "RECORDS")]
    pub records: PathBuf,
}

/// Parse a `FIELD=VALUE` filter. The value may be empty or contain `=`.
fn parse_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got '{}'", s)),
    }
}
