use serde::Serialize;

use crate::aggregation::smooth_series;
use crate::config::AnalysisConfig;
use crate::error::EmotionArcError;
use crate::pipeline::runtime::BatchAnalysis;
use crate::types::{
    AggregateCurve, BinnedDocument, DocumentAnalysis, DocumentFailure, ProgressionPoint,
};

pub const SCHEMA_VERSION: u32 = 1;

/// Multi-document output: one binned row per document plus the mean curve.
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapReport {
    pub schema_version: u32,
    pub meta: HeatmapMeta,
    pub documents: Vec<HeatmapRow>,
    /// `None` when every document failed.
    pub aggregate: Option<AggregateCurve>,
    pub failures: Vec<DocumentFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapMeta {
    pub generated_at: String,
    pub scorer: String,
    pub num_bins: usize,
    pub empty_bin_value: f64,
    pub aggregate_window: usize,
    pub document_count: usize,
    pub failure_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapRow {
    pub name: String,
    pub duration: f64,
    pub cue_count: usize,
    pub values: Vec<f64>,
    /// Zero marks bins filled with `empty_bin_value`.
    pub counts: Vec<usize>,
}

/// Single-document output: per-label trajectories over progression.
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryReport {
    pub schema_version: u32,
    pub meta: TrajectoryMeta,
    pub series: Vec<TrajectorySeries>,
    pub binned: BinnedDocument,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryMeta {
    pub generated_at: String,
    pub scorer: String,
    pub document: String,
    pub duration: f64,
    pub cue_count: usize,
    pub series_window: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrajectorySeries {
    pub label: String,
    pub raw: Vec<ProgressionPoint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub smoothed: Vec<ProgressionPoint>,
}

pub fn build_heatmap_report(
    batch: &BatchAnalysis,
    config: &AnalysisConfig,
    scorer: &str,
    generated_at: String,
) -> Result<HeatmapReport, EmotionArcError> {
    let matrix = batch.matrix(config.num_bins)?;
    let aggregate = if matrix.is_empty() {
        None
    } else {
        Some(matrix.aggregate_curve(config.aggregate_window)?)
    };

    let documents = matrix
        .names()
        .iter()
        .zip(matrix.rows())
        .zip(&batch.documents)
        .map(|((name, values), doc)| HeatmapRow {
            name: name.clone(),
            duration: doc.duration,
            cue_count: doc.cue_count,
            values: values.clone(),
            counts: doc.binned.counts.clone(),
        })
        .collect::<Vec<_>>();

    Ok(HeatmapReport {
        schema_version: SCHEMA_VERSION,
        meta: HeatmapMeta {
            generated_at,
            scorer: scorer.to_string(),
            num_bins: matrix.num_bins(),
            empty_bin_value: config.empty_bin_value,
            aggregate_window: config.aggregate_window,
            document_count: documents.len(),
            failure_count: batch.failures.len(),
        },
        documents,
        aggregate,
        failures: batch.failures.clone(),
    })
}

pub fn build_trajectory_report(
    analysis: &DocumentAnalysis,
    config: &AnalysisConfig,
    scorer: &str,
    generated_at: String,
) -> TrajectoryReport {
    let smoothed = smooth_series(&analysis.series, config.series_window);
    let series = analysis
        .series
        .iter()
        .zip(smoothed)
        .map(|(raw, smoothed)| {
            if smoothed.points.is_empty() {
                tracing::debug!(
                    label = raw.label.as_str(),
                    points = raw.points.len(),
                    window = config.series_window,
                    "report: series shorter than smoothing window"
                );
            }
            TrajectorySeries {
                label: raw.label.clone(),
                raw: raw.points.clone(),
                smoothed: smoothed.points,
            }
        })
        .collect();

    TrajectoryReport {
        schema_version: SCHEMA_VERSION,
        meta: TrajectoryMeta {
            generated_at,
            scorer: scorer.to_string(),
            document: analysis.name.clone(),
            duration: analysis.duration,
            cue_count: analysis.cue_count,
            series_window: config.series_window,
        },
        series,
        binned: analysis.binned.clone(),
    }
}
