//! Category tick reduction for bar plots.
//!
//! Bar plots of whole proteins have hundreds of residues; drawing every
//! label makes the axis unreadable. Two strategies are provided:
//!
//! - [`compacted_bar_xticks`]: square subplots, at most ~10 ticks, chosen by
//!   a decimal modulus on residue numbers (or on positions for non-numeric
//!   labels).
//! - [`extended_bar_xticks`]: wide subplots, every `stride`-th label.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum number of ticks the compacted template aims for.
pub const COMPACTED_MAX_TICKS: usize = 10;

/// Maximum number of modulus rounds in the compacted search.
pub const MAX_MODULUS_ROUNDS: usize = 100_000;

/// Bars covered by one extended tick step.
const EXTENDED_BARS_PER_STEP: usize = 100;

/// Reduced view over a label sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSelection {
    /// Selected bar positions, ascending.
    pub indices: Vec<usize>,
    /// Labels drawn at `indices`.
    pub labels: Vec<String>,
    /// Modulus that produced the selection, if a search ran.
    pub modulus: Option<u64>,
    /// Number of modulus rounds performed.
    pub rounds: usize,
}

impl TickSelection {
    /// Selection that keeps every label.
    #[must_use]
    pub fn all(labels: &[String]) -> Self {
        Self {
            indices: (0..labels.len()).collect(),
            labels: labels.to_vec(),
            modulus: None,
            rounds: 0,
        }
    }

    /// Selection of every `stride`-th label starting at 0.
    ///
    /// A stride of 0 is treated as 1.
    #[must_use]
    pub fn strided(labels: &[String], stride: usize) -> Self {
        let stride = stride.max(1);
        let indices: Vec<usize> = (0..labels.len()).step_by(stride).collect();
        let labels = indices.iter().map(|&i| labels[i].clone()).collect();
        Self {
            indices,
            labels,
            modulus: None,
            rounds: 0,
        }
    }

    /// Number of selected ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Selects the ticks of a compacted bar plot.
///
/// Up to [`COMPACTED_MAX_TICKS`] bars keep every label. Otherwise a modulus
/// starting at 10 grows tenfold each round until at most
/// [`COMPACTED_MAX_TICKS`] ticks remain:
///
/// - if every label parses as an integer, bars whose label value is
///   divisible by the modulus are kept;
/// - otherwise bars whose position is divisible by the modulus are kept.
///
/// The search stops after [`MAX_MODULUS_ROUNDS`] rounds; the last selection
/// is returned even if it still has too many ticks.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if `labels.len() != num_of_bars`.
///
/// # Example
///
/// ```
/// use farseer_plot::ticks::compacted_bar_xticks;
///
/// let labels: Vec<String> = (1..=50).map(|i| i.to_string()).collect();
/// let ticks = compacted_bar_xticks(50, &labels).unwrap();
/// assert_eq!(ticks.labels, ["10", "20", "30", "40", "50"]);
/// assert_eq!(ticks.indices, [9, 19, 29, 39, 49]);
/// ```
pub fn compacted_bar_xticks(num_of_bars: usize, labels: &[String]) -> Result<TickSelection> {
    if labels.len() != num_of_bars {
        return Err(Error::LengthMismatch {
            name: "labels".to_string(),
            expected: num_of_bars,
            actual: labels.len(),
        });
    }

    if num_of_bars <= COMPACTED_MAX_TICKS {
        let selection = TickSelection::all(labels);
        log::debug!("Setting xticks: {:?}", selection.indices);
        return Ok(selection);
    }

    let selection = match parse_int_labels(labels) {
        Some(values) => {
            modulus_search(num_of_bars, |i, m| values[i].unsigned_abs() % m == 0, |i| {
                values[i].to_string()
            })
        }
        None => modulus_search(num_of_bars, |i, m| i as u64 % m == 0, |i| labels[i].clone()),
    };

    log::debug!("sanity_counter: {}", selection.rounds);
    log::debug!("Setting xticks: {:?}", selection.indices);
    log::debug!("xticklabels: {:?}", selection.labels);

    Ok(selection)
}

/// Tick stride for an extended bar plot.
///
/// Returns 1 for up to 100 bars, 2 for up to 200, and so on:
/// `max(1, ceil(num_of_bars / 100))`.
///
/// # Example
///
/// ```
/// use farseer_plot::ticks::extended_bar_xticks;
///
/// assert_eq!(extended_bar_xticks(50), 1);
/// assert_eq!(extended_bar_xticks(150), 2);
/// assert_eq!(extended_bar_xticks(250), 3);
/// ```
#[must_use]
pub fn extended_bar_xticks(num_of_bars: usize) -> usize {
    let stride = num_of_bars.div_ceil(EXTENDED_BARS_PER_STEP).max(1);
    log::debug!("Tick spacing set to: {}", stride);
    stride
}

/// Parses every label as an integer, or returns `None` if any label fails.
fn parse_int_labels(labels: &[String]) -> Option<Vec<i64>> {
    labels.iter().map(|l| l.trim().parse::<i64>().ok()).collect()
}

/// Grows a decimal modulus until `keep` retains few enough bars.
fn modulus_search(
    num_of_bars: usize,
    keep: impl Fn(usize, u64) -> bool,
    label_at: impl Fn(usize) -> String,
) -> TickSelection {
    let mut modulus: u64 = 10;
    let mut rounds = 0;
    let mut indices: Vec<usize> = Vec::new();
    let mut used = modulus;

    while rounds < MAX_MODULUS_ROUNDS {
        indices = (0..num_of_bars).filter(|&i| keep(i, modulus)).collect();
        used = modulus;
        rounds += 1;

        if indices.len() <= COMPACTED_MAX_TICKS {
            break;
        }

        // Past u64 range the modulus already exceeds every i64 label and
        // every position, so later rounds would repeat this selection.
        match modulus.checked_mul(10) {
            Some(next) => modulus = next,
            None => break,
        }
    }

    TickSelection {
        labels: indices.iter().map(|&i| label_at(i)).collect(),
        indices,
        modulus: Some(used),
        rounds,
    }
}
