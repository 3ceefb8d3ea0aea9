//! Bar plot templates.
//!
//! One subplot per row of the values matrix, one bar per residue. Three
//! templates share the pipeline and differ in defaults, orientation and
//! tick reduction:
//!
//! | Template | Bars grow | Ticks |
//! |----------|-----------|-------|
//! | [`BarTemplate::Compacted`] | up | modulus search, at most 10 |
//! | [`BarTemplate::Extended`] | up | every n-th label |
//! | [`BarTemplate::ExtendedVertical`] | right | every n-th label, top to bottom |
//!
//! Unmeasured residues (NaN) are drawn as zero-height bars. Each subplot
//! carries a pair of significance threshold lines at `+t` and `-t`, where
//! `t` comes from [`threshold_std_of_population`] over the row.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::experiment::{finds_paramagnetic_tag, set_item_colors, status_colors, text_marker};
use super::{
    Axis, Bar, FigureLayout, Header, LineStyle, Orientation, Polyline, ReferenceLine, RenderSurface,
    Subplot, TagMarker, TextStyle, Tick, linear_ticks, render,
};
use crate::config::{BarPlotConfig, ThresholdSource};
use crate::error::{Error, Result};
use crate::stats::threshold_std_of_population;
use crate::ticks::{TickSelection, compacted_bar_xticks, extended_bar_xticks};
use crate::validate::validate_barplot_params;

/// The bar plot templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarTemplate {
    Compacted,
    Extended,
    ExtendedVertical,
}

impl BarTemplate {
    /// All templates.
    pub const ALL: [BarTemplate; 3] = [Self::Compacted, Self::Extended, Self::ExtendedVertical];

    /// Human-readable name used in logs and errors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Compacted => "Compacted Bar",
            Self::Extended => "Extended Bar",
            Self::ExtendedVertical => "Extended Vertical Bar",
        }
    }

    /// Default configuration of the template.
    #[must_use]
    pub fn default_config(self) -> BarPlotConfig {
        match self {
            Self::Compacted => BarPlotConfig::compacted(),
            Self::Extended => BarPlotConfig::extended(),
            Self::ExtendedVertical => BarPlotConfig::extended_vertical(),
        }
    }

    /// Direction the bars grow.
    #[must_use]
    pub fn orientation(self) -> Orientation {
        match self {
            Self::Compacted | Self::Extended => Orientation::Vertical,
            Self::ExtendedVertical => Orientation::Horizontal,
        }
    }

    /// Category ticks drawn for `labels`.
    pub fn category_ticks(self, labels: &[String]) -> Result<TickSelection> {
        match self {
            Self::Compacted => compacted_bar_xticks(labels.len(), labels),
            Self::Extended | Self::ExtendedVertical => {
                let stride = extended_bar_xticks(labels.len());
                log::debug!("Extended tick stride: {}", stride);
                Ok(TickSelection::strided(labels, stride))
            }
        }
    }
}

impl fmt::Display for BarTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Compacted => "compacted",
            Self::Extended => "extended",
            Self::ExtendedVertical => "extended-vertical",
        };
        f.write_str(s)
    }
}

impl FromStr for BarTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "compacted" => Ok(Self::Compacted),
            "extended" => Ok(Self::Extended),
            "extended-vertical" => Ok(Self::ExtendedVertical),
            other => Err(Error::invalid_parameter(
                "template",
                format!("unknown bar template '{other}'"),
            )),
        }
    }
}

/// Input data of a bar plot.
///
/// `values` has one row per subplot and one column per residue. The
/// optional companions must match it: `letter_code` per column,
/// `suptitles` per row and the 2-D arrays in full shape.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub values: Array2<f64>,
    /// Residue labels, e.g. residue numbers.
    pub labels: Vec<String>,
    /// Subplot titles; `"0"`, `"1"`, ... when absent.
    pub suptitles: Option<Vec<String>>,
    /// One-letter residue codes; `P` marks prolines.
    pub letter_code: Option<Vec<String>>,
    /// `measured`, `missing` or `unassigned` per value.
    pub peak_status: Option<Array2<String>>,
    /// Free-form user details per value.
    pub details: Option<Array2<String>>,
    /// Tag identifier where the paramagnetic tag sits, anything else
    /// elsewhere.
    pub tag_position: Option<Array2<String>>,
    /// Theoretical PRE per value.
    pub theo_pre: Option<Array2<f64>>,
}

impl BarSeries {
    #[must_use]
    pub fn new(values: Array2<f64>, labels: Vec<String>) -> Self {
        Self {
            values,
            labels,
            suptitles: None,
            letter_code: None,
            peak_status: None,
            details: None,
            tag_position: None,
            theo_pre: None,
        }
    }

    #[must_use]
    pub fn with_suptitles(mut self, suptitles: Vec<String>) -> Self {
        self.suptitles = Some(suptitles);
        self
    }

    #[must_use]
    pub fn with_letter_code(mut self, letter_code: Vec<String>) -> Self {
        self.letter_code = Some(letter_code);
        self
    }

    #[must_use]
    pub fn with_peak_status(mut self, peak_status: Array2<String>) -> Self {
        self.peak_status = Some(peak_status);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: Array2<String>) -> Self {
        self.details = Some(details);
        self
    }

    /// Sets the paramagnetic tag positions and the theoretical PRE.
    #[must_use]
    pub fn with_theoretical_pre(
        mut self,
        tag_position: Array2<String>,
        theo_pre: Array2<f64>,
    ) -> Self {
        self.tag_position = Some(tag_position);
        self.theo_pre = Some(theo_pre);
        self
    }

    /// Title of subplot `i`.
    #[must_use]
    pub fn suptitle(&self, i: usize) -> String {
        self.suptitles
            .as_ref()
            .and_then(|s| s.get(i).cloned())
            .unwrap_or_else(|| i.to_string())
    }
}

/// Threshold lines at `+t` and `-t` for one row.
///
/// `raw_row` still holds NaN for unmeasured residues; `displayed_row` is
/// the same row with NaN drawn as zero. The configured threshold source
/// picks which of the two feeds the statistics. The negative line is only
/// visible when the value axis reaches below zero.
pub fn plot_threshold(
    raw_row: ArrayView1<'_, f64>,
    displayed_row: &[f64],
    config: &BarPlotConfig,
) -> Result<[ReferenceLine; 2]> {
    let params = config.threshold_params();
    let threshold = match config.threshold_source {
        ThresholdSource::Raw => threshold_std_of_population(&raw_row.to_vec(), &params)?,
        ThresholdSource::Displayed => threshold_std_of_population(displayed_row, &params)?,
    };
    log::debug!("Threshold defined: {}", threshold);

    let style = LineStyle::solid(&config.threshold_color, config.threshold_linewidth)
        .with_alpha(config.threshold_alpha);
    let line = |value| ReferenceLine {
        value,
        style: style.clone(),
        zorder: config.threshold_zorder,
    };
    Ok([line(threshold), line(-threshold)])
}

/// Builds one subplot per row of `series`.
///
/// Inputs and configuration are validated first; rows are then built
/// independently and returned in row order.
pub fn build_subplots(
    template: BarTemplate,
    series: &BarSeries,
    config: &BarPlotConfig,
) -> Result<Vec<Subplot>> {
    validate_barplot_params(series)?;
    config.validate(template.name())?;
    log::debug!("* Starting {} Plot", template.name());

    let ticks = template.category_ticks(&series.labels)?;
    log::debug!("xticks represented: {:?}", ticks.indices);

    (0..series.values.nrows())
        .into_par_iter()
        .map(|i| build_subplot(template, series, config, &ticks, i))
        .collect()
}

fn build_subplot(
    template: BarTemplate,
    series: &BarSeries,
    c: &BarPlotConfig,
    ticks: &TickSelection,
    i: usize,
) -> Result<Subplot> {
    let orientation = template.orientation();
    let raw = series.values.row(i);
    let displayed: Vec<f64> = raw.iter().map(|&v| if v.is_nan() { 0.0 } else { v }).collect();
    let num_of_bars = displayed.len();
    let statuses = series.peak_status.as_ref().map(|p| p.row(i));
    let status_map = status_colors(&c.measured_color, &c.missing_color, &c.unassigned_color);

    let category_axis = {
        let lo = -c.bar_width / 2.0;
        let hi = num_of_bars.saturating_sub(1) as f64 + c.bar_width / 2.0;
        let margin = (hi - lo) * 0.01;
        let mut axis = Axis::new(&c.x_label, lo - margin, hi + margin);
        axis.inverted = orientation == Orientation::Horizontal;
        axis.label_style = TextStyle::new(&c.x_label_fn, c.x_label_fs, &c.x_label_weight)
            .rotated(c.x_label_rotation);
        axis.label_pad = c.x_label_pad;
        axis.tick_style = TextStyle::new(&c.x_ticks_fn, c.x_ticks_fs, &c.x_ticks_weight)
            .rotated(c.x_ticks_rot);
        axis.tick_len = c.x_ticks_len;
        axis.tick_pad = c.x_ticks_pad;
        axis.ticks = ticks
            .indices
            .iter()
            .zip(&ticks.labels)
            .map(|(&index, label)| Tick {
                position: index as f64,
                label: label.clone(),
                color: None,
            })
            .collect();
        if let (Some(statuses), true) = (&statuses, c.x_ticks_color_flag) {
            let mut colors: Vec<String> = vec![axis.tick_style.color.clone(); axis.ticks.len()];
            set_item_colors(
                &mut colors,
                ticks.indices.iter().map(|&index| statuses[index].as_str()),
                &status_map,
            );
            for (tick, color) in axis.ticks.iter_mut().zip(colors) {
                tick.color = Some(color);
            }
        }
        axis
    };

    let value_axis = {
        let (ymin, ymax) = c.y_lims;
        let mut axis = Axis::new(&c.y_label, ymin, ymax);
        axis.label_style =
            TextStyle::new(&c.y_label_fn, c.y_label_fs, &c.y_label_weight).rotated(c.y_label_rot);
        axis.label_pad = c.y_label_pad;
        axis.tick_style = TextStyle::new(&c.y_ticks_fn, c.y_ticks_fs, &c.y_ticks_weight)
            .rotated(c.y_ticks_rot);
        axis.tick_len = c.y_ticks_len;
        axis.tick_pad = c.y_ticks_pad;
        axis.ticks = linear_ticks(ymin, ymax, c.y_ticks_nbins);
        axis
    };

    let title = series.suptitle(i);
    log::debug!("Subplot title set to: {}", title);
    let mut subplot = Subplot::new(&title, orientation, category_axis, value_axis);
    subplot.title_style = TextStyle::new(&c.suptitle_fn, c.suptitle_fs, &c.suptitle_weight);
    subplot.title_pad = c.suptitle_pad;
    subplot.bar_width = c.bar_width;
    subplot.bar_alpha = c.bar_alpha;
    subplot.bar_linewidth = c.bar_linewidth;

    if c.y_grid_flag {
        subplot.value_grid = Some(
            LineStyle::solid(&c.y_grid_color, c.y_grid_linewidth)
                .dashed(&c.y_grid_linestyle)
                .with_alpha(c.y_grid_alpha),
        );
    }

    let mut colors = vec![c.measured_color.clone(); num_of_bars];
    if let Some(statuses) = &statuses {
        set_item_colors(&mut colors, statuses.iter().map(String::as_str), &status_map);
    }
    let details = series.details.as_ref().map(|d| d.row(i));
    if let (Some(details), true) = (&details, c.color_user_details_flag) {
        set_item_colors(&mut colors, details.iter().map(String::as_str), &c.user_bar_colors_dict);
    }
    subplot.bars = displayed
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(position, (&value, color))| Bar {
            position: position as f64,
            value,
            color,
        })
        .collect();

    if c.threshold_flag {
        subplot.reference_lines.extend(plot_threshold(raw, &displayed, c)?);
    }

    if let (Some(letter_code), true) = (&series.letter_code, c.mark_prolines_flag) {
        let marks = [("P".to_string(), c.mark_prolines_symbol.clone())].into_iter().collect();
        subplot.marks.extend(text_marker(
            &displayed,
            letter_code.iter().map(String::as_str),
            &marks,
            c.mark_fontsize,
            orientation,
        ));
    }

    if let (Some(details), true) = (&details, c.mark_user_details_flag) {
        subplot.marks.extend(text_marker(
            &displayed,
            details.iter().map(String::as_str),
            &c.user_marks_dict,
            c.mark_fontsize,
            orientation,
        ));
    }

    if let (Some(theo_pre), Some(tag_position), true) =
        (&series.theo_pre, &series.tag_position, c.plot_theoretical_pre)
    {
        subplot.polylines.push(Polyline {
            points: theo_pre.row(i).iter().enumerate().map(|(x, &y)| (x as f64, y)).collect(),
            style: LineStyle::solid(&c.theo_pre_color, c.theo_pre_lw),
            marker: None,
            fill: None,
            zorder: 9,
        });

        let tag_data = tag_position.row(i);
        let tag = finds_paramagnetic_tag(tag_data.iter().map(String::as_str), &c.tag_id);
        if let Some(position) = tag {
            subplot.tags.push(TagMarker {
                position: position as f64,
                height: c.y_lims.1 * 0.1,
                style: LineStyle::solid(&c.tag_cartoon_color, c.tag_cartoon_lw)
                    .dashed(&c.tag_cartoon_ls),
            });
        }
    }

    Ok(subplot)
}

/// Plots `series` with `template` and saves the figure at
/// `config.figure_path`.
pub fn plot<S: RenderSurface>(
    surface: &S,
    template: BarTemplate,
    series: &BarSeries,
    config: &BarPlotConfig,
    header: &str,
) -> Result<()> {
    let subplots = build_subplots(template, series, config)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};
    use rstest::rstest;

    fn labels(n: usize) -> Vec<String> {
        (1..=n).map(|i| i.to_string()).collect()
    }

    fn series(rows: usize, cols: usize) -> BarSeries {
        let values =
            Array2::from_shape_fn((rows, cols), |(r, c)| 0.01 * (r + 1) as f64 + 0.001 * c as f64);
        BarSeries::new(values, labels(cols))
    }

    #[rstest]
    #[case("compacted", BarTemplate::Compacted)]
    #[case("extended", BarTemplate::Extended)]
    #[case("extended-vertical", BarTemplate::ExtendedVertical)]
    fn test_template_names(#[case] name: &str, #[case] template: BarTemplate) {
        assert_eq!(name.parse::<BarTemplate>().unwrap(), template);
        assert_eq!(template.to_string(), name);
    }

    #[test]
    fn test_unknown_template() {
        assert!("heatmap".parse::<BarTemplate>().is_err());
    }

    #[test]
    fn test_one_subplot_per_row() {
        let series = series(4, 30);
        let subplots =
            build_subplots(BarTemplate::Compacted, &series, &BarPlotConfig::compacted()).unwrap();

        assert_eq!(subplots.len(), 4);
        assert_eq!(subplots[2].title, "2");
        assert_eq!(subplots[0].bars.len(), 30);
        assert_eq!(subplots[0].reference_lines.len(), 2);
        assert_eq!(subplots[0].reference_lines[0].value, -subplots[0].reference_lines[1].value);
    }

    #[test]
    fn test_compacted_ticks() {
        let series = series(1, 50);
        let subplots =
            build_subplots(BarTemplate::Compacted, &series, &BarPlotConfig::compacted()).unwrap();
        let labels: Vec<&str> = subplots[0]
            .category_axis
            .ticks
            .iter()
            .map(|t| t.label.as_str())
            .collect();
        assert_eq!(labels, vec!["10", "20", "30", "40", "50"]);
    }

    #[test]
    fn test_extended_ticks_and_orientation() {
        let series = series(1, 250);
        let config = BarPlotConfig::extended_vertical();
        let subplots = build_subplots(BarTemplate::ExtendedVertical, &series, &config).unwrap();
        let axis = &subplots[0].category_axis;

        assert_eq!(subplots[0].orientation, Orientation::Horizontal);
        assert!(axis.inverted);
        assert_eq!(axis.ticks.len(), 84);
        assert_eq!(axis.ticks[1].position, 3.0);
    }

    #[test]
    fn test_nan_drawn_as_zero_threshold_from_raw() {
        let mut values = Array2::from_elem((1, 20), 0.1);
        values[[0, 3]] = f64::NAN;
        let series = BarSeries::new(values, labels(20));

        let raw =
            build_subplots(BarTemplate::Compacted, &series, &BarPlotConfig::compacted()).unwrap();
        assert_eq!(raw[0].bars[3].value, 0.0);
        assert!((raw[0].reference_lines[0].value - 0.1).abs() < 1e-12);

        let config = BarPlotConfig {
            threshold_source: ThresholdSource::Displayed,
            ..BarPlotConfig::compacted()
        };
        let displayed = build_subplots(BarTemplate::Compacted, &series, &config).unwrap();
        // lowest 10% of the displayed row: [0.0, 0.1] -> 0.05 + 5 * 0.05
        assert!((displayed[0].reference_lines[0].value - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_disabled() {
        let config = BarPlotConfig {
            threshold_flag: false,
            ..BarPlotConfig::compacted()
        };
        let subplots = build_subplots(BarTemplate::Compacted, &series(1, 5), &config).unwrap();
        assert!(subplots[0].reference_lines.is_empty());
    }

    #[test]
    fn test_all_nan_row_errors() {
        let series = BarSeries::new(Array2::from_elem((1, 5), f64::NAN), labels(5));
        let err = build_subplots(BarTemplate::Compacted, &series, &BarPlotConfig::compacted())
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientData(_)));
    }

    #[test]
    fn test_bar_linewidth_reaches_subplot() {
        let config = BarPlotConfig {
            bar_linewidth: 3.0,
            ..BarPlotConfig::compacted()
        };
        let subplots = build_subplots(BarTemplate::Compacted, &series(1, 5), &config).unwrap();
        assert_eq!(subplots[0].bar_linewidth, 3.0);
    }

    #[test]
    fn test_status_and_detail_colors() {
        let status = array![[
            "measured".to_string(),
            "missing".to_string(),
            "unassigned".to_string()
        ]];
        let details = array![["None".to_string(), "foo".to_string(), "None".to_string()]];
        let series = BarSeries::new(array![[0.1, 0.2, 0.3]], labels(3))
            .with_peak_status(status)
            .with_details(details);

        let plain =
            build_subplots(BarTemplate::Extended, &series, &BarPlotConfig::extended()).unwrap();
        let colors: Vec<&str> = plain[0].bars.iter().map(|b| b.color.as_str()).collect();
        assert_eq!(colors, vec!["black", "red", "lightgrey"]);
        let tick_colors: Vec<Option<&str>> = plain[0]
            .category_axis
            .ticks
            .iter()
            .map(|t| t.color.as_deref())
            .collect();
        assert_eq!(tick_colors, vec![Some("black"), Some("red"), Some("lightgrey")]);

        let config = BarPlotConfig {
            color_user_details_flag: true,
            mark_user_details_flag: true,
            ..BarPlotConfig::extended()
        };
        let user = build_subplots(BarTemplate::Extended, &series, &config).unwrap();
        assert_eq!(user[0].bars[1].color, "green");
        assert_eq!(user[0].marks.len(), 1);
        assert_eq!(user[0].marks[0].text, "f");
    }

    #[test]
    fn test_proline_marks() {
        let config = BarPlotConfig {
            mark_prolines_flag: true,
            ..BarPlotConfig::compacted()
        };
        let series = BarSeries::new(array![[0.1, -0.2, 0.3]], labels(3))
            .with_letter_code(vec!["A".to_string(), "P".to_string(), "G".to_string()]);
        let subplots = build_subplots(BarTemplate::Compacted, &series, &config).unwrap();

        assert_eq!(subplots[0].marks.len(), 1);
        assert_eq!(subplots[0].marks[0].position, 1.0);
        assert_eq!(subplots[0].marks[0].text, "P");
    }

    #[test]
    fn test_theoretical_pre_and_tag() {
        let config = BarPlotConfig {
            plot_theoretical_pre: true,
            ..BarPlotConfig::compacted()
        };
        let tags = array![["*".to_string(), String::new(), String::new()]];
        let series = BarSeries::new(array![[0.1, 0.2, 0.3]], labels(3))
            .with_theoretical_pre(tags, array![[0.3, 0.2, 0.1]]);
        let subplots = build_subplots(BarTemplate::Compacted, &series, &config).unwrap();

        assert_eq!(subplots[0].polylines.len(), 1);
        assert_eq!(subplots[0].polylines[0].points[2], (2.0, 0.1));
        assert_eq!(subplots[0].tags.len(), 1);
        assert_eq!(subplots[0].tags[0].position, 0.0);
        assert!((subplots[0].tags[0].height - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let series =
            series(2, 5).with_peak_status(Array2::from_elem((2, 4), "measured".to_string()));
        assert!(matches!(
            build_subplots(BarTemplate::Compacted, &series, &BarPlotConfig::compacted()),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
