//! Shape and length checks for plot inputs.
//!
//! Every companion array of a plot must line up with the values matrix:
//! per-residue arrays with its columns, per-subplot arrays with its rows
//! and 2-D annotations with its full shape. The checks run before anything
//! is drawn so a mismatch never produces a half-written figure.

use ndarray::ArrayView2;

use crate::error::{Error, Result};
use crate::plot::bar::BarSeries;
use crate::plot::evolution::EvolutionSeries;

/// Checks that `name` has `expected` entries.
pub fn validate_len(name: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        log::info!(
            "'{}' does not have the expected length: {} vs {}",
            name,
            actual,
            expected
        );
        return Err(Error::LengthMismatch {
            name: name.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Checks that `array` has shape `expected`.
pub fn validate_shape<T>(
    name: &str,
    expected: (usize, usize),
    array: ArrayView2<'_, T>,
) -> Result<()> {
    let actual = array.dim();
    if actual != expected {
        log::info!(
            "'{}' does not have the expected shape: {:?} vs {:?}",
            name,
            actual,
            expected
        );
        return Err(Error::ShapeMismatch {
            name: name.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Validates the inputs of the bar plot templates.
pub fn validate_barplot_params(series: &BarSeries) -> Result<()> {
    let shape = series.values.dim();
    let (rows, cols) = shape;

    if let Some(peak_status) = &series.peak_status {
        validate_shape("peak_status", shape, peak_status.view())?;
    }
    if let Some(details) = &series.details {
        validate_shape("details", shape, details.view())?;
    }
    if let Some(tag_position) = &series.tag_position {
        validate_shape("tag_position", shape, tag_position.view())?;
    }
    if let Some(theo_pre) = &series.theo_pre {
        validate_shape("theo_pre", shape, theo_pre.view())?;
    }

    validate_len("labels", cols, series.labels.len())?;
    if let Some(letter_code) = &series.letter_code {
        validate_len("letter_code", cols, letter_code.len())?;
    }
    if let Some(suptitles) = &series.suptitles {
        validate_len("suptitles", rows, suptitles.len())?;
    }
    Ok(())
}

/// Validates the inputs of the parameter evolution template.
pub fn validate_evolution_params(series: &EvolutionSeries) -> Result<()> {
    let shape = series.values.dim();
    let rows = shape.0;

    if let Some(peak_status) = &series.peak_status {
        validate_shape("peak_status", shape, peak_status.view())?;
    }
    if let Some(suptitles) = &series.suptitles {
        validate_len("suptitles", rows, suptitles.len())?;
    }
    if let Some(fitting) = &series.fitting {
        validate_len("fitting", rows, fitting.nrows())?;
    }
    if let Some(fitting_info) = &series.fitting_info {
        validate_len("fitting_info", rows, fitting_info.len())?;
    }
    Ok(())
}
