use crate::aggregation::smoothing::moving_average;
use crate::error::EmotionArcError;
use crate::types::AggregateCurve;

/// Binned rows of several documents, all with the same number of bins.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateMatrix {
    num_bins: usize,
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl AggregateMatrix {
    pub fn new(num_bins: usize) -> Self {
        Self {
            num_bins,
            names: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(
        &mut self,
        name: impl Into<String>,
        row: Vec<f64>,
    ) -> Result<(), EmotionArcError> {
        let name = name.into();
        if row.len() != self.num_bins {
            return Err(EmotionArcError::invalid_input(format!(
                "row '{name}' has {} bins, matrix expects {}",
                row.len(),
                self.num_bins
            )));
        }
        self.names.push(name);
        self.rows.push(row);
        Ok(())
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Unweighted mean of each bin across documents.
    pub fn column_mean(&self) -> Result<Vec<f64>, EmotionArcError> {
        if self.rows.is_empty() {
            return Err(EmotionArcError::invalid_input(
                "column mean of an empty matrix is undefined",
            ));
        }
        let mut sums = vec![0.0f64; self.num_bins];
        for row in &self.rows {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }
        let count = self.rows.len() as f64;
        Ok(sums.into_iter().map(|sum| sum / count).collect())
    }

    /// Column mean plus its moving average. Bin indices are smoothed with the
    /// same window so overlay positions line up with the matrix columns.
    pub fn aggregate_curve(&self, window: usize) -> Result<AggregateCurve, EmotionArcError> {
        let mean = self.column_mean()?;
        let smoothed = moving_average(&mean, window);
        let bin_positions: Vec<f64> = (0..self.num_bins).map(|i| i as f64).collect();
        let positions = moving_average(&bin_positions, window);
        if smoothed.is_empty() {
            tracing::warn!(
                window,
                num_bins = self.num_bins,
                "normalizer: smoothing window exceeds bin count; smoothed curve is empty"
            );
        }
        Ok(AggregateCurve {
            mean,
            smoothed,
            positions,
        })
    }
}
