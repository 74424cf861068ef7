//! End-to-end scoring pipeline driven by CLI arguments.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use scorebatch_infer::{load_cached, predict};
use scorebatch_model::ScoreFrame;
use scorebatch_output::{ExportFormat, export};
use scorebatch_report::EnrichedReport;
use scorebatch_validate::resolve_features;

use crate::cli::{ExportFormatArg, InspectArgs, ScoreArgs};

/// Result of a scoring run: the enriched report, and the path the export
/// was written to (absent on dry runs).
pub struct ScoreOutcome {
    pub report: EnrichedReport,
    pub output_path: Option<PathBuf>,
}

/// Load, validate, score, enrich and export in one pass.
pub fn run_score(args: &ScoreArgs) -> anyhow::Result<ScoreOutcome> {
    let frame = load_input(&args.input)?;
    let model = load_cached(&args.model)
        .with_context(|| format!("failed to load model artifact '{}'", args.model.display()))?;
    let features = resolve_features(model.as_ref(), &frame)?;
    let scores = predict(model.as_ref(), &features)?;
    let report = EnrichedReport::build(frame, scores)?;

    let output_path = if args.dry_run {
        info!("dry run requested; skipping export");
        None
    } else {
        let format = export_format(args.format);
        let bytes = export(&report, format)?;
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.input, format));
        fs::write(&path, bytes)
            .with_context(|| format!("failed to write report to '{}'", path.display()))?;
        info!(path = %path.display(), "report written");
        Some(path)
    };

    Ok(ScoreOutcome {
        report,
        output_path,
    })
}

/// Load an input file without scoring it.
pub fn run_inspect(args: &InspectArgs) -> anyhow::Result<ScoreFrame> {
    load_input(&args.input)
}

fn load_input(path: &Path) -> anyhow::Result<ScoreFrame> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read input file '{}'", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input.csv".to_string());
    Ok(scorebatch_ingest::load(&filename, &bytes)?)
}

fn export_format(arg: ExportFormatArg) -> ExportFormat {
    match arg {
        ExportFormatArg::Csv => ExportFormat::Csv,
        ExportFormatArg::Xlsx => ExportFormat::Xlsx,
    }
}

/// `data/clients.csv` scored as CSV becomes `data/clients_scored.csv`.
fn default_output_path(input: &Path, format: ExportFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    input.with_file_name(format!("{stem}_scored.{}", format.extension()))
}
