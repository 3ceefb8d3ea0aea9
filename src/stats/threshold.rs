//! Significance threshold from the low-magnitude population of a sample.
//!
//! Titration experiments usually leave most residues unperturbed, so the
//! smallest absolute values of a row approximate the baseline noise. The
//! threshold is the mean of that population plus a multiple of its
//! population standard deviation:
//!
//! ```text
//! mean(pop) + std * sigma(pop)
//! ```
//!
//! where `pop` is the `population` fraction of measured values with the
//! lowest magnitudes.

use ndarray::ArrayViewD;
use serde::{Deserialize, Serialize};

use super::{mean, population_std_dev};
use crate::error::{Error, Result};

/// Parameters for [`threshold_std_of_population`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdParams {
    /// Standard deviation multiplier. Defaults to 5.
    pub std: f64,
    /// Fraction of measured values, lowest magnitudes first, that forms the
    /// baseline population. Defaults to 0.1.
    pub population: f64,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            std: 5.0,
            population: 0.1,
        }
    }
}

impl ThresholdParams {
    /// Creates parameters with the given multiplier and population fraction.
    #[must_use]
    pub fn new(std: f64, population: f64) -> Self {
        Self { std, population }
    }

    /// Checks that both parameters are usable.
    ///
    /// The multiplier must be finite and the population fraction must lie in
    /// `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !self.std.is_finite() {
            return Err(Error::invalid_parameter(
                "std",
                format!("must be finite, is {}", self.std),
            ));
        }
        if !(self.population > 0.0 && self.population <= 1.0) {
            return Err(Error::invalid_parameter(
                "population",
                format!("must be in (0, 1], is {}", self.population),
            ));
        }
        Ok(())
    }
}

/// Calculates the significance threshold of a 1-D sample.
///
/// NaN entries are unmeasured residues and are ignored. The input is never
/// modified.
///
/// # Errors
///
/// - [`Error::InvalidParameter`] if `params` are out of range.
/// - [`Error::InsufficientData`] if the sample is empty or contains only
///   NaN, or if the resulting threshold is not finite.
///
/// # Example
///
/// ```
/// use farseer_plot::stats::{threshold_std_of_population, ThresholdParams};
///
/// let t = threshold_std_of_population(&[1.0; 100], &ThresholdParams::default()).unwrap();
/// assert_eq!(t, 1.0);
/// ```
pub fn threshold_std_of_population(values: &[f64], params: &ThresholdParams) -> Result<f64> {
    params.validate()?;

    let mut parsed: Vec<f64> = values
        .iter()
        .map(|v| v.abs())
        .filter(|v| !v.is_nan())
        .collect();

    if parsed.is_empty() {
        return Err(Error::InsufficientData(format!(
            "no measured values among {} entries",
            values.len()
        )));
    }

    parsed.sort_by(f64::total_cmp);

    let take = (params.population * parsed.len() as f64).ceil() as usize;
    let firstpop = &parsed[..take.clamp(1, parsed.len())];
    log::debug!("<firstpop>: {:?}", firstpop);

    let mean = mean(firstpop);
    log::debug!("mean: {}", mean);

    let stdev = population_std_dev(firstpop);
    log::debug!("stdev: {}", stdev);

    let threshold = mean + params.std * stdev;
    log::debug!("threshold: {}", threshold);

    if !threshold.is_finite() {
        return Err(Error::InsufficientData(format!(
            "threshold is not finite ({threshold})"
        )));
    }

    Ok(threshold)
}

/// Calculates the threshold of a dynamically shaped array.
///
/// # Errors
///
/// Returns [`Error::Dimension`] unless the array is one-dimensional, plus
/// every error of [`threshold_std_of_population`].
pub fn threshold_of_array(values: ArrayViewD<'_, f64>, params: &ThresholdParams) -> Result<f64> {
    if values.ndim() != 1 {
        return Err(Error::Dimension {
            name: "values".to_string(),
            expected: 1,
            actual: values.ndim(),
        });
    }
    let sample: Vec<f64> = values.iter().copied().collect();
    threshold_std_of_population(&sample, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    #[test]
    fn test_threshold_of_ones() {
        let t = threshold_std_of_population(&[1.0; 100], &ThresholdParams::default()).unwrap();
        assert_eq!(t, 1.0);
    }

    #[test]
    fn test_threshold_of_range() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let t = threshold_std_of_population(&values, &ThresholdParams::default()).unwrap();

        let lowest: Vec<f64> = (0..10).map(f64::from).collect();
        let expected = mean(&lowest) + 5.0 * population_std_dev(&lowest);
        assert_eq!(t, expected);
        assert!((t - (4.5 + 5.0 * 8.25_f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_sign_flip_invariance() {
        let values = [0.3, -0.12, 0.05, 0.9, -0.01, 0.44, 0.07, -0.2, 0.18, 0.02, 0.6];
        let flipped: Vec<f64> = values.iter().map(|v| -v).collect();
        let params = ThresholdParams::default();

        let a = threshold_std_of_population(&values, &params).unwrap();
        let b = threshold_std_of_population(&flipped, &params).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_repeated_calls_identical() {
        let values = [0.31, 0.02, 0.11, f64::NAN, 0.07, 0.25, 0.004, 0.15];
        let params = ThresholdParams::default();
        let a = threshold_std_of_population(&values, &params).unwrap();
        let b = threshold_std_of_population(&values, &params).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_nan_entries_are_ignored() {
        let mut values = vec![f64::NAN; 5];
        values.extend([2.0; 10]);
        let t = threshold_std_of_population(&values, &ThresholdParams::default()).unwrap();
        assert_eq!(t, 2.0);
    }

    #[test]
    fn test_input_not_mutated() {
        let values = vec![-3.0, 1.0, f64::NAN, 2.0];
        let copy = values.clone();
        threshold_std_of_population(&values, &ThresholdParams::default()).unwrap();
        assert_eq!(values[0], copy[0]);
        assert!(values[2].is_nan());
    }

    #[test]
    fn test_population_fraction_is_used() {
        let values: Vec<f64> = (0..10).map(f64::from).collect();
        // Half of ten values: 0..5
        let t = threshold_std_of_population(&values, &ThresholdParams::new(0.0, 0.5)).unwrap();
        assert_eq!(t, 2.0);
    }

    #[test]
    fn test_small_sample_takes_at_least_one() {
        let t = threshold_std_of_population(&[0.4, 0.9], &ThresholdParams::default()).unwrap();
        assert_eq!(t, 0.4);
    }

    #[test]
    fn test_large_finite_sample() {
        let t = threshold_std_of_population(&[1e308; 100], &ThresholdParams::default()).unwrap();
        assert!(t.is_finite());
        assert!((t / 1e308 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sample_is_error() {
        let err = threshold_std_of_population(&[], &ThresholdParams::default()).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }

    #[test]
    fn test_all_nan_is_error() {
        let err =
            threshold_std_of_population(&[f64::NAN; 4], &ThresholdParams::default()).unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }

    #[test]
    fn test_invalid_params() {
        let values = [1.0, 2.0];
        assert!(threshold_std_of_population(&values, &ThresholdParams::new(5.0, 0.0)).is_err());
        assert!(threshold_std_of_population(&values, &ThresholdParams::new(5.0, 1.5)).is_err());
        assert!(
            threshold_std_of_population(&values, &ThresholdParams::new(f64::NAN, 0.1)).is_err()
        );
    }

    #[test]
    fn test_array_must_be_one_dimensional() {
        let matrix = Array2::<f64>::ones((3, 4));
        let err = threshold_of_array(matrix.view().into_dyn(), &ThresholdParams::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Dimension {
                expected: 1,
                actual: 2,
                ..
            }
        ));

        let row = Array1::<f64>::ones(20);
        let t = threshold_of_array(row.view().into_dyn(), &ThresholdParams::default()).unwrap();
        assert_eq!(t, 1.0);
    }
}
