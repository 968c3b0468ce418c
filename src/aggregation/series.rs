use std::collections::BTreeMap;

use crate::aggregation::progression;
use crate::aggregation::smoothing::smooth_points;
use crate::types::{EmotionSeries, ProgressionPoint, ScoredCue};

/// Per-label `(progression, score)` series in cue order.
///
/// A label missing from a cue's score set contributes no point for that cue.
/// Series are ordered with `leading_label` first, then alphabetically.
pub fn build_series(
    scored: &[ScoredCue],
    duration: f64,
    leading_label: &str,
) -> Vec<EmotionSeries> {
    let mut by_label: BTreeMap<&str, Vec<ProgressionPoint>> = BTreeMap::new();
    for entry in scored {
        let x = progression(entry.cue.midpoint(), duration);
        for score in &entry.scores.scores {
            by_label
                .entry(score.label.as_str())
                .or_default()
                .push(ProgressionPoint {
                    progression: x,
                    score: score.score,
                });
        }
    }

    let labels = order_labels(by_label.keys().copied(), leading_label);
    labels
        .into_iter()
        .filter_map(|label| {
            by_label.remove(label.as_str()).map(|points| EmotionSeries { label, points })
        })
        .collect()
}

/// Sorts and dedups labels, moving `leading_label` to the front when present.
pub fn order_labels<'a>(
    labels: impl IntoIterator<Item = &'a str>,
    leading_label: &str,
) -> Vec<String> {
    let mut ordered: Vec<String> = labels.into_iter().map(str::to_string).collect();
    ordered.sort();
    ordered.dedup();
    if let Some(pos) = ordered.iter().position(|label| label == leading_label) {
        let leading = ordered.remove(pos);
        ordered.insert(0, leading);
    }
    ordered
}

pub fn smooth_series(series: &[EmotionSeries], window: usize) -> Vec<EmotionSeries> {
    series
        .iter()
        .map(|s| EmotionSeries {
            label: s.label.clone(),
            points: smooth_points(&s.points, window),
        })
        .collect()
}
