use crate::error::EmotionArcError;
use crate::types::BinnedDocument;

/// `num_bins + 1` equally spaced edges over `[0, duration]`. The last edge is
/// exactly `duration` so the closed final bin absorbs the maximum end time.
pub fn bin_edges(duration: f64, num_bins: usize) -> Vec<f64> {
    let mut edges: Vec<f64> = (0..=num_bins)
        .map(|i| duration * i as f64 / num_bins as f64)
        .collect();
    if let Some(last) = edges.last_mut() {
        *last = duration;
    }
    edges
}

/// Bin holding `x`: bins are `[edge_i, edge_{i+1})` except the last one, which
/// is closed on both ends. A value exactly on an inner edge belongs to the bin
/// that starts there. Returns `None` outside `[edges[0], edges[last]]`.
pub fn bin_index(x: f64, edges: &[f64]) -> Option<usize> {
    if edges.len() < 2 || !x.is_finite() {
        return None;
    }
    let num_bins = edges.len() - 1;
    let first = edges[0];
    let last = edges[num_bins];
    if x < first || x > last {
        return None;
    }
    if x == last {
        return Some(num_bins - 1);
    }
    let at_or_below = edges.partition_point(|&edge| edge <= x);
    Some((at_or_below - 1).min(num_bins - 1))
}

/// Averages `(midpoint, value)` samples into `num_bins` equal-width bins over
/// `[0, duration]`. Bins that receive no sample hold `empty_bin_value`; a bin
/// whose samples are all 0.0 keeps 0.0 and a non-zero count.
pub fn bin_intensities(
    samples: &[(f64, f64)],
    duration: f64,
    num_bins: usize,
    empty_bin_value: f64,
) -> Result<BinnedDocument, EmotionArcError> {
    if num_bins == 0 {
        return Err(EmotionArcError::invalid_input("num_bins must be >= 1"));
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(EmotionArcError::invalid_input(format!(
            "duration must be positive and finite, got {duration}"
        )));
    }

    let edges = bin_edges(duration, num_bins);
    let mut sums = vec![0.0f64; num_bins];
    let mut counts = vec![0usize; num_bins];
    let mut skipped = 0usize;

    for &(midpoint, value) in samples {
        match bin_index(midpoint, &edges) {
            Some(bin) => {
                sums[bin] += value;
                counts[bin] += 1;
            }
            None => {
                skipped += 1;
                tracing::warn!(
                    midpoint,
                    duration,
                    "binning: cue midpoint outside document span; skipped"
                );
            }
        }
    }

    let values: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&sum, &count)| {
            if count > 0 {
                sum / count as f64
            } else {
                empty_bin_value
            }
        })
        .collect();

    let empty_bins = counts.iter().filter(|&&count| count == 0).count();
    tracing::debug!(
        num_bins,
        sample_count = samples.len(),
        skipped,
        empty_bins,
        "binning: document binned"
    );

    Ok(BinnedDocument {
        values,
        counts,
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_span_duration() {
        let edges = bin_edges(8.0, 4);
        assert_eq!(edges, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn last_edge_is_exact_duration() {
        let duration = 0.1 + 0.2;
        let edges = bin_edges(duration, 3);
        assert_eq!(edges.len(), 4);
        assert_eq!(*edges.last().unwrap(), duration);
    }

    #[test]
    fn inner_edge_belongs_to_the_bin_starting_there() {
        let edges = bin_edges(8.0, 4);
        assert_eq!(bin_index(0.0, &edges), Some(0));
        assert_eq!(bin_index(1.999, &edges), Some(0));
        assert_eq!(bin_index(2.0, &edges), Some(1));
        assert_eq!(bin_index(6.0, &edges), Some(3));
    }

    #[test]
    fn final_bin_is_closed() {
        let edges = bin_edges(8.0, 4);
        assert_eq!(bin_index(8.0, &edges), Some(3));
    }

    #[test]
    fn out_of_range_values_have_no_bin() {
        let edges = bin_edges(8.0, 4);
        assert_eq!(bin_index(-0.5, &edges), None);
        assert_eq!(bin_index(8.5, &edges), None);
        assert_eq!(bin_index(f64::NAN, &edges), None);
        assert_eq!(bin_index(1.0, &[0.0]), None);
    }

    #[test]
    fn rejects_zero_bins_and_bad_duration() {
        assert!(bin_intensities(&[(1.0, 0.5)], 2.0, 0, 0.2).is_err());
        assert!(bin_intensities(&[(1.0, 0.5)], 0.0, 4, 0.2).is_err());
        assert!(bin_intensities(&[(1.0, 0.5)], f64::INFINITY, 4, 0.2).is_err());
    }

    #[test]
    fn out_of_range_samples_do_not_count() {
        let binned = bin_intensities(&[(-1.0, 0.9), (1.0, 0.4)], 4.0, 2, 0.2).unwrap();
        assert_eq!(binned.counts, vec![1, 0]);
        assert_eq!(binned.values, vec![0.4, 0.2]);
    }
}
