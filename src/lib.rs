pub mod aggregation;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod subtitle;
pub mod types;

pub use aggregation::{bin_intensities, moving_average, AggregateMatrix};
pub use config::AnalysisConfig;
pub use error::EmotionArcError;
pub use pipeline::builder::EmotionArcBuilder;
pub use pipeline::defaults::{NeutralComplement, PrecomputedScorer};
pub use pipeline::runtime::{document_name, BatchAnalysis, EmotionArc};
pub use pipeline::traits::{EmotionScorer, IntensityMeasure};
pub use report::{build_heatmap_report, build_trajectory_report, HeatmapReport, TrajectoryReport};
pub use subtitle::{document_duration, extract_cues, parse_timecode, read_document};
pub use types::{
    AggregateCurve, BinnedDocument, Cue, DocumentAnalysis, DocumentFailure, EmotionScore,
    EmotionScoreSet, EmotionSeries, ProgressionPoint, ScoredCue, SubtitleDocument,
};
