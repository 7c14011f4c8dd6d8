//! Subcommand entry points: argument resolution and dispatch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use cogres_ingest::{read_csv, write_csv};
use cogres_model::{Aggregation, CompositeOptions};
use cogres_score::{score_criq, score_csaq, score_ipaq, score_sni};

use crate::cli::{AggregationArg, CompositesArgs, QuestionnaireArg, ScoreArgs};
use crate::pipeline::{CompositesConfig, CompositesResult, run_composites_pipeline};

pub fn run_composites(args: &CompositesArgs) -> Result<CompositesResult> {
    let mut options = CompositeOptions::default()
        .with_aggregation(match args.aggregation {
            AggregationArg::Mean => Aggregation::Mean,
            AggregationArg::Sum => Aggregation::Sum,
        })
        .with_min_subset_size(args.min_size);
    if let Some(sample) = args.spot_checks {
        options = options.with_spot_check_sample(sample);
    }
    options = options.with_seed(args.seed);

    let config = CompositesConfig {
        input: args.input.clone(),
        subject_col: args.subject_col.clone(),
        proxies: args.proxies.clone(),
        options,
        standardize: args.standardize,
        flip: args.flip.clone(),
        output_dir: resolve_output_dir(args.output_dir.as_deref(), &args.input),
        dry_run: args.dry_run,
        keep_on_errors: args.keep_on_errors,
    };
    run_composites_pipeline(&config)
}

/// Outcome of one scoring run, consumed by the summary printer.
#[derive(Debug)]
pub struct ScoreResult {
    pub questionnaire: &'static str,
    pub subjects: usize,
    pub columns: Vec<String>,
    pub output_csv: Option<PathBuf>,
}

pub fn run_score(args: &ScoreArgs) -> Result<ScoreResult> {
    let name = questionnaire_name(args.questionnaire);
    let span = info_span!("score", questionnaire = name, input = %args.input.display());
    let _guard = span.enter();

    let df = read_csv(&args.input)?;
    let mut scored = match args.questionnaire {
        QuestionnaireArg::Criq => score_criq(&df)?,
        QuestionnaireArg::Ipaq => score_ipaq(&df, !args.no_truncate)?,
        QuestionnaireArg::Sni => score_sni(&df, &args.subject_col)?,
        QuestionnaireArg::Csaq => score_csaq(&df, &args.subject_col)?,
    };
    info!(subjects = scored.height(), "scored questionnaire");

    let output_csv = if args.dry_run {
        None
    } else {
        let dir = resolve_output_dir(args.output_dir.as_deref(), &args.input);
        let path = dir.join(format!("{name}_scored.csv"));
        write_csv(&mut scored, &path).context("write scored CSV")?;
        Some(path)
    };

    Ok(ScoreResult {
        questionnaire: name,
        subjects: scored.height(),
        columns: column_names(&scored),
        output_csv,
    })
}

fn questionnaire_name(questionnaire: QuestionnaireArg) -> &'static str {
    match questionnaire {
        QuestionnaireArg::Criq => "criq",
        QuestionnaireArg::Ipaq => "ipaq",
        QuestionnaireArg::Sni => "sni",
        QuestionnaireArg::Csaq => "csaq",
    }
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn resolve_output_dir(explicit: Option<&Path>, input: &Path) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    }
}
