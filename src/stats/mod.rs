//! Statistics over titration rows.
//!
//! ## Core Statistics
//!
//! - [`mean`], [`population_std_dev`]: Basic statistical functions
//! - [`threshold_std_of_population`]: Significance threshold of a sample
//! - [`row_thresholds`]: One threshold per row of a data matrix
//! - [`RowSummary`]: Per-row description used for reporting

mod threshold;

pub use threshold::{ThresholdParams, threshold_of_array, threshold_std_of_population};

use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Compute arithmetic mean.
///
/// # Example
///
/// ```
/// use farseer_plot::stats::mean;
///
/// assert!((mean(&[1.0, 2.0, 3.0, 4.0, 5.0]) - 3.0).abs() < 0.001);
/// ```
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let m = values.iter().sum::<f64>() / n;
    if m.is_finite() {
        return m;
    }
    match overflow_scale(values) {
        Some(scale) => values.iter().map(|v| v / scale).sum::<f64>() / n * scale,
        None => m,
    }
}

/// Compute population standard deviation.
///
/// Divides by N, not N-1.
///
/// # Example
///
/// ```
/// use farseer_plot::stats::population_std_dev;
///
/// let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_std_dev(&values) - 2.0).abs() < 0.001);
/// ```
#[must_use]
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = |scale: f64| {
        let m = mean(values) / scale;
        values.iter().map(|x| (x / scale - m).powi(2)).sum::<f64>() / values.len() as f64
    };
    let unscaled = variance(1.0);
    if unscaled.is_finite() {
        return unscaled.sqrt();
    }
    match overflow_scale(values) {
        Some(scale) => variance(scale).sqrt() * scale,
        None => unscaled.sqrt(),
    }
}

/// Power of two bringing the largest magnitude of `values` into `[1, 2)`.
///
/// `None` when a value is not finite or all values are zero.
fn overflow_scale(values: &[f64]) -> Option<f64> {
    if values.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let max = values.iter().map(|v| v.abs()).fold(0.0, f64::max);
    if max == 0.0 {
        return None;
    }
    Some(2f64.powi(max.log2().floor() as i32))
}

/// Computes one threshold per row of `values`.
///
/// Rows are independent and evaluated in parallel; the output keeps row
/// order. The first failing row aborts the whole computation.
pub fn row_thresholds(values: ArrayView2<'_, f64>, params: &ThresholdParams) -> Result<Vec<f64>> {
    (0..values.nrows())
        .into_par_iter()
        .map(|i| {
            let row: Vec<f64> = values.row(i).to_vec();
            threshold_std_of_population(&row, params)
        })
        .collect()
}

/// Description of a single titration row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSummary {
    /// Number of residues in the row.
    pub count: usize,
    /// Number of unmeasured (NaN) residues.
    pub missing: usize,
    /// Mean of the measured values.
    pub mean: f64,
    /// Largest absolute measured value.
    pub max_abs: f64,
    /// Significance threshold.
    pub threshold: f64,
    /// Indices of residues whose absolute value exceeds the threshold.
    pub significant: Vec<usize>,
}

impl RowSummary {
    /// Summarise a row.
    pub fn compute(row: ArrayView1<'_, f64>, params: &ThresholdParams) -> Result<Self> {
        let values: Vec<f64> = row.to_vec();
        let threshold = threshold_std_of_population(&values, params)?;

        let measured: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let max_abs = measured.iter().map(|v| v.abs()).fold(0.0, f64::max);
        let significant = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.abs() > threshold)
            .map(|(i, _)| i)
            .collect();

        Ok(Self {
            count: values.len(),
            missing: values.len() - measured.len(),
            mean: mean(&measured),
            max_abs,
            threshold,
            significant,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_population_std_dev() {
        assert_eq!(population_std_dev(&[3.0, 3.0, 3.0]), 0.0);
        assert!((population_std_dev(&[1.0, 3.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        let values = [1e308; 10];
        assert!((mean(&values) / 1e308 - 1.0).abs() < 1e-12);
        assert!(population_std_dev(&values) / 1e308 < 1e-12);

        let spread = [1.5e308, -1.5e308];
        assert_eq!(mean(&spread), 0.0);
        assert!((population_std_dev(&spread) / 1.5e308 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_row_thresholds_keeps_order() {
        let mut values = Array2::<f64>::ones((3, 20));
        values.row_mut(1).fill(2.0);
        values.row_mut(2).fill(0.5);

        let t = row_thresholds(values.view(), &ThresholdParams::default()).unwrap();
        assert_eq!(t, vec![1.0, 2.0, 0.5]);
    }

    #[test]
    fn test_row_thresholds_propagates_error() {
        let mut values = Array2::<f64>::ones((2, 5));
        values.row_mut(1).fill(f64::NAN);
        assert!(row_thresholds(values.view(), &ThresholdParams::default()).is_err());
    }

    #[test]
    fn test_row_summary() {
        let row = array![0.1, 0.1, f64::NAN, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.1, 0.9, -0.8];
        let summary = RowSummary::compute(row.view(), &ThresholdParams::default()).unwrap();

        assert_eq!(summary.count, 13);
        assert_eq!(summary.missing, 1);
        assert!((summary.threshold - 0.1).abs() < 1e-12);
        assert_eq!(summary.max_abs, 0.9);
        assert_eq!(summary.significant, vec![11, 12]);
    }
}
