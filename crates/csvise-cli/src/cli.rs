//! CLI argument definitions for csvise.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use csvise_cli::logging::LogFormat;
use csvise_model::CaseStyle;
use csvise_transform::CleaningStep;

#[derive(Parser)]
#[command(
    name = "csvise",
    version,
    about = "Inspect, validate, clean and profile delimited text files",
    long_about = "Inspect, validate, clean and profile delimited text files.\n\n\
                  The delimiter is detected from the header line and every column\n\
                  gets an expected type (bool, int, float, str) by majority vote."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: csvise.json in the working directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Field delimiter; skips detection when set.
    #[arg(short = 'd', long = "delimiter", value_name = "DELIM", global = true)]
    pub delimiter: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the file as an aligned table.
    View(ViewArgs),

    /// Report rows with the wrong length or unexpected value types.
    Validate(ValidateArgs),

    /// Run cleaning steps in order and write the result.
    Clean(CleanArgs),

    /// Per-column descriptive statistics.
    Stats(StatsArgs),

    /// Pearson correlation between numeric columns.
    Correlation(CorrelationArgs),

    /// Flag outliers in a numeric column.
    Outliers(OutliersArgs),

    /// Most frequent values per column.
    Distribution(DistributionArgs),

    /// Completeness, consistency and uniqueness scores.
    Quality(QualityArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Delimited text file to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// First data row to show (1-based).
    #[arg(long = "start", value_name = "N")]
    pub start: Option<usize>,

    /// Maximum number of rows to show.
    #[arg(long = "rows", value_name = "N")]
    pub rows: Option<usize>,

    /// Draw lines between columns.
    #[arg(long = "column-lines")]
    pub column_lines: bool,

    /// Draw lines between rows.
    #[arg(long = "row-lines")]
    pub row_lines: bool,

    /// Case transform for displayed text.
    #[arg(long = "case", value_name = "STYLE")]
    pub case: Option<CaseStyle>,

    /// Write the plain-text rendering to a file instead of printing it.
    #[arg(long = "save-to-file", value_name = "PATH")]
    pub save_to_file: Option<PathBuf>,

    /// Append the validation report.
    #[arg(long = "report")]
    pub report: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only check row lengths.
    #[arg(long = "no-type-check")]
    pub no_type_check: bool,

    /// Treat int and float as distinct types.
    #[arg(long = "strict-numeric")]
    pub strict_numeric: bool,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct CleanArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Destination file for the cleaned table.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Cleaning step, repeatable; steps run in the order given.
    ///
    /// dedupe[:cols], whitespace[:cols], case:STYLE[:cols],
    /// fill:mode|mean|median|empty|value=TEXT[:cols], drop-empty:THRESHOLD,
    /// dates:iso|us|eu:cols
    #[arg(long = "step", value_name = "STEP", required = true)]
    pub steps: Vec<CleaningStep>,

    /// Delimiter for the written file (default: the input's delimiter).
    #[arg(long = "output-delimiter", value_name = "DELIM")]
    pub output_delimiter: Option<String>,

    /// Print the cleaning log as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Restrict to these columns.
    #[arg(long = "columns", value_name = "COLS", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Use the sample (n - 1) standard deviation.
    #[arg(long = "sample")]
    pub sample: bool,

    /// Print statistics as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct CorrelationArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Restrict to these numeric columns.
    #[arg(long = "columns", value_name = "COLS", value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Print the matrix as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct OutliersArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Numeric column to check.
    #[arg(long = "column", value_name = "NAME")]
    pub column: String,

    /// Detection method.
    #[arg(long = "method", value_enum, default_value = "iqr")]
    pub method: OutlierMethodArg,

    /// IQR multiplier or z-score threshold (default 1.5 or 3.0).
    #[arg(long = "threshold", value_name = "T")]
    pub threshold: Option<f64>,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct DistributionArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Single column to inspect (default: every non-numeric column).
    #[arg(long = "column", value_name = "NAME")]
    pub column: Option<String>,

    /// Number of values to list.
    #[arg(long = "top", value_name = "N", default_value_t = 10)]
    pub top: usize,

    /// Print distributions as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct QualityArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the report as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutlierMethodArg {
    Iqr,
    Zscore,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
