use std::path::Path;

use serde::Deserialize;

use crate::error::EmotionArcError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of equal-width bins spanning `[0, duration]` of every document.
    pub num_bins: usize,
    /// Moving-average window for per-label trajectories.
    pub series_window: usize,
    /// Moving-average window for the cross-document mean curve.
    pub aggregate_window: usize,
    /// Value written to bins that received no cue. `counts` on the binned
    /// document stays the authoritative "no data" signal.
    pub empty_bin_value: f64,
    /// Label whose complement is the emotionality of a cue.
    pub reference_label: String,
    pub scorer_batch_size: usize,
}

impl AnalysisConfig {
    pub const DEFAULT_NUM_BINS: usize = 100;
    pub const DEFAULT_SERIES_WINDOW: usize = 10;
    pub const DEFAULT_AGGREGATE_WINDOW: usize = 5;
    pub const DEFAULT_EMPTY_BIN_VALUE: f64 = 0.2;
    pub const DEFAULT_REFERENCE_LABEL: &'static str = "neutral";
    pub const DEFAULT_SCORER_BATCH_SIZE: usize = 32;

    pub fn load(path: &Path) -> Result<Self, EmotionArcError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| EmotionArcError::io("read analysis config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| EmotionArcError::json("parse analysis config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EmotionArcError> {
        if self.num_bins == 0 {
            return Err(EmotionArcError::invalid_input("num_bins must be >= 1"));
        }
        if self.series_window == 0 || self.aggregate_window == 0 {
            return Err(EmotionArcError::invalid_input(
                "smoothing windows must be >= 1",
            ));
        }
        if self.scorer_batch_size == 0 {
            return Err(EmotionArcError::invalid_input(
                "scorer_batch_size must be >= 1",
            ));
        }
        if !self.empty_bin_value.is_finite() {
            return Err(EmotionArcError::invalid_input(format!(
                "empty_bin_value must be finite, got {}",
                self.empty_bin_value
            )));
        }
        if self.reference_label.trim().is_empty() {
            return Err(EmotionArcError::invalid_input(
                "reference_label must not be empty",
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            num_bins: Self::DEFAULT_NUM_BINS,
            series_window: Self::DEFAULT_SERIES_WINDOW,
            aggregate_window: Self::DEFAULT_AGGREGATE_WINDOW,
            empty_bin_value: Self::DEFAULT_EMPTY_BIN_VALUE,
            reference_label: Self::DEFAULT_REFERENCE_LABEL.to_string(),
            scorer_batch_size: Self::DEFAULT_SCORER_BATCH_SIZE,
        }
    }
}
