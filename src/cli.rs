use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::format::{Separator, parse_separator};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Explore a CSV, Excel or JSON dataset from the terminal",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the full insight report for a dataset
    Report(ReportArgs),
    /// Preview the first few rows of a dataset in a formatted table
    Preview(PreviewArgs),
    /// List the numeric, text and temporal columns of a dataset
    Classify(ClassifyArgs),
    /// Cross-tabulate a numeric column against the top values of a text column
    Crosstab(CrosstabArgs),
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Dataset to load (`-` reads stdin and requires --format)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Declared file format (csv, xlsx or json); defaults to the file extension
    #[arg(long)]
    pub format: Option<String>,
    /// CSV separator (supports ',', ';', '|', 'tab' and their names)
    #[arg(long, value_parser = parse_separator)]
    pub separator: Option<Separator>,
    /// Character encoding of CSV and JSON uploads (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// YAML file with default separator, encoding and selections
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Restrict the report to this comma-separated list of columns
    #[arg(short = 'C', long = "columns", value_delimiter = ',')]
    pub columns: Vec<String>,
    /// Numeric column for the cross-tab (defaults to the first numeric column)
    #[arg(long)]
    pub numeric: Option<String>,
    /// Text column for the cross-tab (defaults to the first text column)
    #[arg(long)]
    pub text: Option<String>,
    /// Number of rows shown in the preview section
    #[arg(long = "preview-rows")]
    pub preview_rows: Option<usize>,
    /// Output mode
    #[arg(long, value_enum, default_value_t = OutputMode::Text)]
    pub output: OutputMode,
}

#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Number of rows to display
    #[arg(long)]
    pub rows: Option<usize>,
    /// Output mode
    #[arg(long, value_enum, default_value_t = OutputMode::Text)]
    pub output: OutputMode,
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Output mode
    #[arg(long, value_enum, default_value_t = OutputMode::Text)]
    pub output: OutputMode,
}

#[derive(Debug, Args)]
pub struct CrosstabArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Numeric column providing the table's columns
    #[arg(long)]
    pub numeric: String,
    /// Text column whose ten most frequent values become rows
    #[arg(long)]
    pub text: String,
    /// Output mode
    #[arg(long, value_enum, default_value_t = OutputMode::Text)]
    pub output: OutputMode,
}
