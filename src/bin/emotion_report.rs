use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use emotion_arc_rs::{
    build_heatmap_report, build_trajectory_report, document_name, read_document, AnalysisConfig,
    DocumentFailure, EmotionArc, EmotionArcBuilder, EmotionScoreSet, PrecomputedScorer,
    SubtitleDocument,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

#[path = "emotion_report/json_report_formatter.rs"]
mod json_report_formatter;

const SUBTITLE_EXTENSION: &str = "srt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportMode {
    /// One binned row per document plus the cross-document mean.
    Heatmap,
    /// Per-label trajectories for a single document.
    Trajectory,
}

#[derive(Debug, Parser)]
#[command(name = "emotion_report")]
#[command(about = "Build time-aligned emotional intensity reports from scored subtitles")]
struct Args {
    /// Subtitle file, or a directory of .srt files.
    #[arg(env = "EMOTION_ARC_INPUT")]
    input: PathBuf,
    /// JSON object mapping cue text to classifier output.
    #[arg(long, env = "EMOTION_ARC_SCORES")]
    scores: PathBuf,
    /// Score texts missing from --scores as fully neutral instead of failing.
    #[arg(long, env = "EMOTION_ARC_MISSING_AS_NEUTRAL", default_value_t = false)]
    missing_as_neutral: bool,
    #[arg(long, env = "EMOTION_ARC_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "EMOTION_ARC_NUM_BINS")]
    num_bins: Option<usize>,
    #[arg(long, env = "EMOTION_ARC_SERIES_WINDOW")]
    series_window: Option<usize>,
    #[arg(long, env = "EMOTION_ARC_AGGREGATE_WINDOW")]
    aggregate_window: Option<usize>,
    #[arg(long, env = "EMOTION_ARC_EMPTY_BIN_VALUE")]
    empty_bin_value: Option<f64>,
    #[arg(long, env = "EMOTION_ARC_MODE", value_enum)]
    mode: Option<ReportMode>,
    #[arg(long, env = "EMOTION_ARC_OUT")]
    out: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let is_dir = args.input.is_dir();
    let mode = args.mode.unwrap_or(if is_dir {
        ReportMode::Heatmap
    } else {
        ReportMode::Trajectory
    });
    if mode == ReportMode::Trajectory && is_dir {
        return Err(format!(
            "trajectory mode expects a single subtitle file, got directory '{}'",
            args.input.display()
        ));
    }

    let mut scorer = PrecomputedScorer::from_json_file(&args.scores)
        .map_err(|err| format!("Failed to load scores '{}': {err}", args.scores.display()))?;
    if args.missing_as_neutral {
        scorer = scorer.with_fallback(EmotionScoreSet::from_pairs([(
            config.reference_label.as_str(),
            1.0,
        )]));
    }
    let arc = EmotionArcBuilder::new(config)
        .with_scorer(Box::new(scorer))
        .build()
        .map_err(|err| format!("Failed to build analysis pipeline: {err}"))?;

    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| default_out_path(&args.input, mode));
    match mode {
        ReportMode::Heatmap => run_heatmap(&arc, &args.input, is_dir, &out_path)?,
        ReportMode::Trajectory => run_trajectory(&arc, &args.input, &out_path)?,
    }
    println!("{}", out_path.display());
    Ok(())
}

fn resolve_config(args: &Args) -> Result<AnalysisConfig, String> {
    let mut config = match args.config.as_ref() {
        Some(path) => AnalysisConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(num_bins) = args.num_bins {
        config.num_bins = num_bins;
    }
    if let Some(window) = args.series_window {
        config.series_window = window;
    }
    if let Some(window) = args.aggregate_window {
        config.aggregate_window = window;
    }
    if let Some(value) = args.empty_bin_value {
        config.empty_bin_value = value;
    }
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

fn run_heatmap(
    arc: &EmotionArc,
    input: &Path,
    is_dir: bool,
    out_path: &Path,
) -> Result<(), String> {
    let paths = if is_dir {
        list_subtitle_files(input)?
    } else {
        vec![input.to_path_buf()]
    };
    if paths.is_empty() {
        return Err(format!("No .srt files found under '{}'.", input.display()));
    }

    let mut documents = Vec::with_capacity(paths.len());
    let mut read_failures = Vec::new();
    for path in &paths {
        let name = document_name(path);
        match read_document(path) {
            Ok(content) => documents.push(SubtitleDocument { name, content }),
            Err(err) => read_failures.push(DocumentFailure {
                name,
                error: err.to_string(),
            }),
        }
    }

    let progress = ProgressBar::new(documents.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("starting...");
    let mut batch = arc.analyze_batch_with(&documents, |name, _| {
        progress.set_message(name.to_string());
        progress.inc(1);
    });
    progress.finish_with_message("analysis pass complete");

    read_failures.append(&mut batch.failures);
    batch.failures = read_failures;
    for failure in &batch.failures {
        eprintln!("skipped {}: {}", failure.name, failure.error);
    }
    if batch.documents.is_empty() {
        return Err(format!(
            "All {} document(s) failed; no report written.",
            paths.len()
        ));
    }

    let report = build_heatmap_report(
        &batch,
        arc.config(),
        &arc.scorer_name(),
        Utc::now().to_rfc3339(),
    )
    .map_err(|err| format!("Failed to aggregate documents: {err}"))?;
    json_report_formatter::write_report(out_path, &report)
}

fn run_trajectory(arc: &EmotionArc, input: &Path, out_path: &Path) -> Result<(), String> {
    let analysis = arc
        .analyze_path(input)
        .map_err(|err| format!("{}: {err}", input.display()))?;
    let report = build_trajectory_report(
        &analysis,
        arc.config(),
        &arc.scorer_name(),
        Utc::now().to_rfc3339(),
    );
    json_report_formatter::write_report(out_path, &report)
}

fn list_subtitle_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(dir)
        .map_err(|err| format!("Failed to list directory '{}': {err}", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| format!("Failed to read entry in '{}': {err}", dir.display()))?
            .path();
        let is_subtitle = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SUBTITLE_EXTENSION));
        if path.is_file() && is_subtitle {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn default_out_path(input: &Path, mode: ReportMode) -> PathBuf {
    match mode {
        ReportMode::Heatmap => PathBuf::from("reports").join("emotion_heatmap.json"),
        ReportMode::Trajectory => {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document".to_string());
            PathBuf::from("reports").join(format!("{stem}_trajectory.json"))
        }
    }
}
