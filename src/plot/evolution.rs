//! Parameter evolution template.
//!
//! One subplot per residue showing how a parameter evolves along the
//! titration series. Residues whose first point is `unassigned` get an
//! empty subplot with an "unassigned" note; unmeasured points are left
//! out of the line.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::{
    Annotation, Axis, FigureLayout, Fill, Header, LineStyle, MarkerStyle, Orientation, Polyline,
    RenderSurface, Subplot, TextAlign, TextStyle, Tick, linear_ticks, render,
};
use crate::config::EvolutionConfig;
use crate::error::Result;
use crate::validate::{validate_evolution_params, validate_len};

/// Input data of a parameter evolution plot.
///
/// `values` has one row per residue and one column per titration point.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionSeries {
    pub values: Array2<f64>,
    /// Subplot titles; `"0"`, `"1"`, ... when absent.
    pub suptitles: Option<Vec<String>>,
    /// `measured`, `missing` or `unassigned` per value.
    pub peak_status: Option<Array2<String>>,
    /// Fitted curve per residue, sampled evenly over the titration range.
    pub fitting: Option<Array2<f64>>,
    /// Text shown in the top-left corner of each fitted subplot.
    pub fitting_info: Option<Vec<String>>,
}

impl EvolutionSeries {
    #[must_use]
    pub fn new(values: Array2<f64>) -> Self {
        Self {
            values,
            suptitles: None,
            peak_status: None,
            fitting: None,
            fitting_info: None,
        }
    }

    #[must_use]
    pub fn with_suptitles(mut self, suptitles: Vec<String>) -> Self {
        self.suptitles = Some(suptitles);
        self
    }

    #[must_use]
    pub fn with_peak_status(mut self, peak_status: Array2<String>) -> Self {
        self.peak_status = Some(peak_status);
        self
    }

    /// Sets fitted curves and, optionally, their descriptions.
    #[must_use]
    pub fn with_fitting(mut self, fitting: Array2<f64>, fitting_info: Option<Vec<String>>) -> Self {
        self.fitting = Some(fitting);
        self.fitting_info = fitting_info;
        self
    }

    fn suptitle(&self, i: usize) -> String {
        self.suptitles
            .as_ref()
            .and_then(|s| s.get(i).cloned())
            .unwrap_or_else(|| i.to_string())
    }
}

/// Positions and labels of the titration points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitrationAxis {
    pub positions: Vec<f64>,
    pub labels: Vec<String>,
    /// Positions come from the labels' numeric values.
    pub numeric: bool,
}

impl TitrationAxis {
    /// Axis for `num_points` points labelled by `x_values`.
    ///
    /// Labels that all parse as numbers place the points at those values;
    /// any other labels are spread evenly. No labels means `0, 1, 2, ...`.
    pub fn new(x_values: &[String], num_points: usize) -> Result<Self> {
        if x_values.is_empty() {
            return Ok(Self {
                positions: (0..num_points).map(|i| i as f64).collect(),
                labels: (0..num_points).map(|i| i.to_string()).collect(),
                numeric: false,
            });
        }
        validate_len("titration_x_values", num_points, x_values.len())?;

        let parsed: Option<Vec<f64>> =
            x_values.iter().map(|v| v.trim().parse::<f64>().ok()).collect();
        let numeric = parsed.is_some();
        let positions = parsed.unwrap_or_else(|| (0..num_points).map(|i| i as f64).collect());
        log::debug!("xticks: {:?}", positions);
        Ok(Self {
            positions,
            labels: x_values.to_vec(),
            numeric,
        })
    }

    fn range(&self) -> (f64, f64) {
        let first = self.positions.first().copied().unwrap_or(0.0);
        let last = self.positions.last().copied().unwrap_or(0.0);
        if first == last { (first - 0.5, last + 0.5) } else { (first, last) }
    }
}

/// Builds one subplot per residue.
pub fn build_subplots(series: &EvolutionSeries, config: &EvolutionConfig) -> Result<Vec<Subplot>> {
    validate_evolution_params(series)?;
    config.validate()?;
    log::debug!("* Starting {} Plot", EvolutionConfig::TEMPLATE);

    let axis = TitrationAxis::new(&config.titration_x_values, series.values.ncols())?;
    Ok((0..series.values.nrows())
        .map(|i| build_subplot(series, config, &axis, i))
        .collect())
}

fn build_subplot(
    series: &EvolutionSeries,
    c: &EvolutionConfig,
    x: &TitrationAxis,
    i: usize,
) -> Subplot {
    let (xmin, xmax) = x.range();
    let (ymin, ymax) = c.y_lims;

    let mut category_axis = Axis::new(&c.x_label, xmin, xmax);
    category_axis.label_style = TextStyle::new(&c.x_label_fn, c.x_label_fs, &c.x_label_weight);
    category_axis.label_pad = c.x_label_pad;
    category_axis.tick_style =
        TextStyle::new(&c.x_ticks_fn, c.x_ticks_fs, &c.x_ticks_weight).rotated(c.x_ticks_rot);
    category_axis.tick_len = c.x_ticks_len;
    category_axis.tick_pad = c.x_ticks_pad;
    category_axis.ticks = if x.numeric {
        linear_ticks(xmin, xmax, c.x_ticks_nbins)
    } else {
        x.positions
            .iter()
            .zip(&x.labels)
            .map(|(&position, label)| Tick {
                position,
                label: label.clone(),
                color: None,
            })
            .collect()
    };

    let mut value_axis = Axis::new(&c.y_label, ymin, ymax);
    value_axis.label_style =
        TextStyle::new(&c.y_label_fn, c.y_label_fs, &c.y_label_weight).rotated(90.0);
    value_axis.label_pad = c.y_label_pad;
    value_axis.tick_style =
        TextStyle::new(&c.y_ticks_fn, c.y_ticks_fs, &c.y_ticks_weight).rotated(c.y_ticks_rot);
    value_axis.tick_len = c.y_ticks_len;
    value_axis.tick_pad = c.y_ticks_pad;
    value_axis.ticks = linear_ticks(ymin, ymax, c.y_ticks_nbins);

    let mut subplot =
        Subplot::new(&series.suptitle(i), Orientation::Vertical, category_axis, value_axis);
    subplot.title_style = TextStyle::new(&c.subtitle_fn, c.subtitle_fs, &c.subtitle_weight);
    subplot.title_pad = c.subtitle_pad;

    let statuses = series.peak_status.as_ref().map(|p| p.row(i));
    if statuses.as_ref().and_then(|s| s.get(0)).is_some_and(|s| s == "unassigned") {
        subplot.annotations.push(Annotation {
            position: ((xmin + xmax) / 2.0, (ymin + ymax) / 2.0),
            text: "unassigned".to_string(),
            size: 8.0,
            align: TextAlign::Center,
        });
        return subplot;
    }

    let points = measured_points(series.values.row(i), statuses, &x.positions);
    subplot.polylines.push(Polyline {
        points,
        style: LineStyle::solid(&c.line_color, c.line_width).dashed(&c.line_style),
        marker: Some(MarkerStyle {
            shape: c.marker_style.clone(),
            color: c.marker_color.clone(),
            size: c.marker_size,
        }),
        fill: c.fill_between.then(|| Fill {
            color: c.fill_color.clone(),
            alpha: c.fill_alpha,
        }),
        zorder: 5,
    });

    if let Some(fitting) = &series.fitting {
        let row = fitting.row(i);
        let (first, last) = (
            x.positions.first().copied().unwrap_or(0.0),
            x.positions.last().copied().unwrap_or(0.0),
        );
        subplot.polylines.push(Polyline {
            points: linspace(first, last, row.len()).into_iter().zip(row.iter().copied()).collect(),
            style: LineStyle::solid(&c.fit_line_color, c.fit_line_width).dashed(&c.fit_line_style),
            marker: None,
            fill: None,
            zorder: 6,
        });
    }

    if let Some(info) = series.fitting_info.as_ref().and_then(|f| f.get(i)) {
        subplot.annotations.push(Annotation {
            position: (xmin + (xmax - xmin) * 0.05, ymax * 0.97),
            text: info.clone(),
            size: 4.0,
            align: TextAlign::TopLeft,
        });
    }

    subplot
}

/// Points whose status is `measured` (every point without statuses),
/// unmeasured values skipped.
fn measured_points(
    values: ArrayView1<'_, f64>,
    statuses: Option<ArrayView1<'_, String>>,
    xs: &[f64],
) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .filter(|&(j, v)| {
            !v.is_nan() && statuses.as_ref().is_none_or(|s| s[j] == "measured")
        })
        .map(|(j, &v)| (xs[j], v))
        .collect()
}

/// `n` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n)
            .map(|k| start + (end - start) * k as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Plots `series` and saves the figure at `config.figure_path`.
pub fn plot<S: RenderSurface>(
    surface: &S,
    series: &EvolutionSeries,
    config: &EvolutionConfig,
    header: &str,
) -> Result<()> {
    let subplots = build_subplots(series, config)?;
    let layout = FigureLayout::new(
        subplots.len(),
        config.rows_page,
        config.cols_page,
        config.fig_height,
        config.fig_width,
    )?
    .with_spacing(config.hspace, config.wspace);

    render(
        surface,
        &layout,
        &subplots,
        &config.figure_path,
        &Header::new(header, config.header_fontsize),
        config.figure_dpi,
    )
}
