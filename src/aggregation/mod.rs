//! Temporal aggregation: mapping scored cues onto a normalized progression axis.

mod binning;
mod normalizer;
mod series;
mod smoothing;

pub use binning::{bin_edges, bin_index, bin_intensities};
pub use normalizer::AggregateMatrix;
pub use series::{build_series, order_labels, smooth_series};
pub use smoothing::{moving_average, smooth_points};

/// Cue midpoint as a percentage of the document duration.
pub fn progression(midpoint: f64, duration: f64) -> f64 {
    midpoint / duration * 100.0
}
