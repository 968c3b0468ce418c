use crate::types::ProgressionPoint;

/// Valid-mode moving average: each output is the mean of `window` consecutive
/// inputs, giving `len - window + 1` values. A window of zero or one longer
/// than the input produces an empty vector.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > values.len() {
        return Vec::new();
    }
    let divisor = window as f64;
    values
        .windows(window)
        .map(|chunk| chunk.iter().sum::<f64>() / divisor)
        .collect()
}

/// Smooths both axes of a point series with the same window so each smoothed
/// score stays paired with its smoothed progression.
pub fn smooth_points(points: &[ProgressionPoint], window: usize) -> Vec<ProgressionPoint> {
    let xs: Vec<f64> = points.iter().map(|p| p.progression).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.score).collect();
    moving_average(&xs, window)
        .into_iter()
        .zip(moving_average(&ys, window))
        .map(|(progression, score)| ProgressionPoint { progression, score })
        .collect()
}
