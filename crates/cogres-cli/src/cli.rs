//! CLI argument definitions for the cogres toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cogres",
    version,
    about = "Cognitive reserve proxy toolkit - composites and questionnaire scoring",
    long_about = "Build and validate cognitive-reserve composite variables from \
                  subject-keyed proxy tables, and score the CRIq, IPAQ short form, \
                  SNI, and CSAQ questionnaires."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Build and validate composite proxy variables from a CSV table.
    Composites(CompositesArgs),

    /// Score a questionnaire CSV (CRIq, IPAQ, SNI, or CSAQ).
    Score(ScoreArgs),
}

#[derive(Parser)]
pub struct CompositesArgs {
    /// Path to the subject-keyed proxy CSV file.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Name of the subject-identifier column.
    #[arg(long = "subject-col", default_value = "subid")]
    pub subject_col: String,

    /// Proxy columns to combine (default: every non-subject column).
    #[arg(long = "proxies", value_delimiter = ',', value_name = "COL,..")]
    pub proxies: Option<Vec<String>>,

    /// Row-wise aggregation used for each composite.
    #[arg(long = "aggregation", value_enum, default_value = "mean")]
    pub aggregation: AggregationArg,

    /// Smallest subset size to enumerate (1 includes the single-proxy
    /// columns themselves, 2 starts at pairs).
    #[arg(long = "min-size", default_value_t = 1)]
    pub min_size: usize,

    /// Z-score the proxy columns before building composites.
    #[arg(long = "standardize")]
    pub standardize: bool,

    /// Negate these columns first (for proxies coded so that higher
    /// values mean lower reserve).
    #[arg(long = "flip", value_delimiter = ',', value_name = "COL,..")]
    pub flip: Vec<String>,

    /// Number of composite columns to re-derive in the spot check.
    #[arg(long = "spot-checks", value_name = "N")]
    pub spot_checks: Option<usize>,

    /// RNG seed for the spot-check sample (reproducible reports).
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Output directory (default: the input file's directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Validate and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write the composites CSV even when validation reports errors.
    ///
    /// By default the composites file is not written when any validation
    /// check fails; the JSON report is always written.
    #[arg(long = "keep-on-errors")]
    pub keep_on_errors: bool,
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// Questionnaire to score.
    #[arg(value_enum, value_name = "QUESTIONNAIRE")]
    pub questionnaire: QuestionnaireArg,

    /// Path to the cleaned questionnaire CSV file.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Name of the subject-identifier column (SNI and CSAQ layouts).
    #[arg(long = "subject-col", default_value = "subid")]
    pub subject_col: String,

    /// Disable the 180-minute session truncation (IPAQ only).
    #[arg(long = "no-truncate")]
    pub no_truncate: bool,

    /// Output directory (default: the input file's directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Score and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AggregationArg {
    Mean,
    Sum,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum QuestionnaireArg {
    Criq,
    Ipaq,
    Sni,
    Csaq,
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

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
