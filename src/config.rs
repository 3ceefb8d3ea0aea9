//! Typed plot template configuration.
//!
//! Each template has a configuration struct with documented defaults. User
//! overrides arrive as a JSON object and are checked against the schema of
//! the defaults before merging: unknown keys and values of the wrong JSON
//! type are rejected.
//!
//! ```
//! use farseer_plot::config::BarPlotConfig;
//! use serde_json::json;
//!
//! let overrides = json!({"figure_dpi": 150, "y_lims": [0.0, 0.5]});
//! let config = BarPlotConfig::compacted()
//!     .with_overrides("Compacted Bar", overrides.as_object().unwrap())
//!     .unwrap();
//! assert_eq!(config.figure_dpi, 150);
//!
//! let typo = json!({"figure_dip": 150});
//! assert!(BarPlotConfig::compacted()
//!     .with_overrides("Compacted Bar", typo.as_object().unwrap())
//!     .is_err());
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color;
use crate::error::{Error, Result};
use crate::stats::ThresholdParams;

/// Which values the significance threshold is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdSource {
    /// The raw row, unmeasured residues (NaN) excluded.
    #[default]
    Raw,
    /// The displayed row, where unmeasured residues count as zero.
    Displayed,
}

/// Configuration shared by the compacted and extended bar plot templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct BarPlotConfig {
    /// Subplot columns per page.
    pub cols_page: usize,
    /// Subplot rows per page.
    pub rows_page: usize,

    /// Value axis limits.
    pub y_lims: (f64, f64),
    /// Category axis title.
    pub x_label: String,
    /// Value axis title.
    pub y_label: String,

    pub suptitle_fn: String,
    pub suptitle_fs: f64,
    pub suptitle_pad: f64,
    pub suptitle_weight: String,

    pub x_label_fn: String,
    pub x_label_fs: f64,
    pub x_label_pad: f64,
    pub x_label_weight: String,
    pub x_label_rotation: f64,

    pub y_label_fn: String,
    pub y_label_fs: f64,
    pub y_label_pad: f64,
    pub y_label_weight: String,
    pub y_label_rot: f64,

    pub x_ticks_pad: f64,
    pub x_ticks_len: f64,
    pub x_ticks_fn: String,
    pub x_ticks_fs: f64,
    pub x_ticks_rot: f64,
    pub x_ticks_weight: String,
    /// Colour category tick labels by peak status (extended templates).
    pub x_ticks_color_flag: bool,

    pub y_ticks_fn: String,
    pub y_ticks_fs: f64,
    pub y_ticks_rot: f64,
    pub y_ticks_pad: f64,
    pub y_ticks_weight: String,
    pub y_ticks_len: f64,
    /// Number of intervals on the value axis.
    pub y_ticks_nbins: usize,

    pub y_grid_flag: bool,
    pub y_grid_color: String,
    pub y_grid_linestyle: String,
    pub y_grid_linewidth: f64,
    pub y_grid_alpha: f64,

    pub measured_color: String,
    pub missing_color: String,
    pub unassigned_color: String,

    pub bar_width: f64,
    pub bar_alpha: f64,
    pub bar_linewidth: f64,

    pub mark_fontsize: f64,
    pub mark_prolines_flag: bool,
    pub mark_prolines_symbol: String,
    pub mark_user_details_flag: bool,
    pub color_user_details_flag: bool,
    /// Detail value -> text mark.
    pub user_marks_dict: BTreeMap<String, String>,
    /// Detail value -> bar colour.
    pub user_bar_colors_dict: BTreeMap<String, String>,

    pub threshold_flag: bool,
    pub threshold_color: String,
    pub threshold_linewidth: f64,
    pub threshold_alpha: f64,
    pub threshold_zorder: i32,
    /// Standard deviation multiplier of the threshold.
    pub threshold_std: f64,
    /// Low-magnitude population fraction of the threshold.
    pub threshold_population: f64,
    pub threshold_source: ThresholdSource,

    pub plot_theoretical_pre: bool,
    pub theo_pre_color: String,
    pub theo_pre_lw: f64,
    /// Marker of the paramagnetic tag position.
    pub tag_id: String,

    pub tag_cartoon_color: String,
    pub tag_cartoon_ls: String,
    pub tag_cartoon_lw: f64,

    pub hspace: f64,
    pub wspace: f64,

    pub header_fontsize: f64,

    pub figure_path: PathBuf,
    pub figure_dpi: u32,
    /// Page height in inches.
    pub fig_height: f64,
    /// Page width in inches.
    pub fig_width: f64,
}

impl Default for BarPlotConfig {
    fn default() -> Self {
        Self::compacted()
    }
}

impl BarPlotConfig {
    /// Defaults of the compacted bar plot: square subplots, 3 x 5 per page.
    #[must_use]
    pub fn compacted() -> Self {
        let marks = [("foo", "f"), ("bar", "b"), ("boo", "o")];
        let colors = [("foo", "green"), ("bar", "yellow"), ("boo", "magenta")];
        Self {
            cols_page: 3,
            rows_page: 5,
            y_lims: (0.0, 0.3),
            x_label: "Residues".to_string(),
            y_label: "your labels goes here".to_string(),
            suptitle_fn: "Arial".to_string(),
            suptitle_fs: 8.0,
            suptitle_pad: 0.99,
            suptitle_weight: "normal".to_string(),
            x_label_fn: "Arial".to_string(),
            x_label_fs: 8.0,
            x_label_pad: 2.0,
            x_label_weight: "bold".to_string(),
            x_label_rotation: 0.0,
            y_label_fn: "Arial".to_string(),
            y_label_fs: 8.0,
            y_label_pad: 3.0,
            y_label_weight: "bold".to_string(),
            y_label_rot: 90.0,
            x_ticks_pad: 2.0,
            x_ticks_len: 2.0,
            x_ticks_fn: "Arial".to_string(),
            x_ticks_fs: 6.0,
            x_ticks_rot: 0.0,
            x_ticks_weight: "normal".to_string(),
            x_ticks_color_flag: false,
            y_ticks_fn: "Arial".to_string(),
            y_ticks_fs: 6.0,
            y_ticks_rot: 0.0,
            y_ticks_pad: 1.0,
            y_ticks_weight: "normal".to_string(),
            y_ticks_len: 2.0,
            y_ticks_nbins: 8,
            y_grid_flag: true,
            y_grid_color: "lightgrey".to_string(),
            y_grid_linestyle: "-".to_string(),
            y_grid_linewidth: 0.2,
            y_grid_alpha: 0.8,
            measured_color: "black".to_string(),
            missing_color: "red".to_string(),
            unassigned_color: "lightgrey".to_string(),
            bar_width: 0.8,
            bar_alpha: 1.0,
            bar_linewidth: 0.0,
            mark_fontsize: 4.0,
            mark_prolines_flag: false,
            mark_prolines_symbol: "P".to_string(),
            mark_user_details_flag: false,
            color_user_details_flag: false,
            user_marks_dict: string_map(&marks),
            user_bar_colors_dict: string_map(&colors),
            threshold_flag: true,
            threshold_color: "red".to_string(),
            threshold_linewidth: 0.5,
            threshold_alpha: 0.8,
            threshold_zorder: 10,
            threshold_std: 5.0,
            threshold_population: 0.1,
            threshold_source: ThresholdSource::Raw,
            plot_theoretical_pre: false,
            theo_pre_color: "red".to_string(),
            theo_pre_lw: 1.0,
            tag_id: "*".to_string(),
            tag_cartoon_color: "black".to_string(),
            tag_cartoon_ls: "-".to_string(),
            tag_cartoon_lw: 1.0,
            hspace: 0.5,
            wspace: 0.5,
            header_fontsize: 5.0,
            figure_path: PathBuf::from("bar_compacted.svg"),
            figure_dpi: 300,
            fig_height: 11.69,
            fig_width: 8.69,
        }
    }

    /// Defaults of the extended bar plot: one wide subplot per row, 6 per page.
    #[must_use]
    pub fn extended() -> Self {
        Self {
            cols_page: 1,
            rows_page: 6,
            x_ticks_fn: "monospace".to_string(),
            x_ticks_rot: 90.0,
            x_ticks_color_flag: true,
            figure_path: PathBuf::from("bar_extended_horizontal.svg"),
            ..Self::compacted()
        }
    }

    /// Defaults of the extended vertical bar plot: bars grow sideways,
    /// subplots side by side, 5 x 2 per page.
    #[must_use]
    pub fn extended_vertical() -> Self {
        Self {
            cols_page: 5,
            rows_page: 2,
            x_label_pad: 15.0,
            x_label_rotation: -90.0,
            y_label_rot: 0.0,
            x_ticks_fs: 4.0,
            x_ticks_rot: 0.0,
            y_ticks_rot: 45.0,
            figure_path: PathBuf::from("bar_extended_vertical.svg"),
            ..Self::extended()
        }
    }

    /// Merges validated overrides into this configuration.
    pub fn with_overrides(&self, template: &str, overrides: &Map<String, Value>) -> Result<Self> {
        let merged = apply_overrides(self, overrides, template)?;
        merged.validate(template)?;
        log::debug!("Parameters type for {} evaluated successfully", template);
        Ok(merged)
    }

    /// Sets the output path.
    #[must_use]
    pub fn with_figure_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.figure_path = path.into();
        self
    }

    /// Threshold parameters of this configuration.
    #[must_use]
    pub fn threshold_params(&self) -> ThresholdParams {
        ThresholdParams::new(self.threshold_std, self.threshold_population)
    }

    /// Checks semantic constraints the type system cannot express.
    pub fn validate(&self, template: &str) -> Result<()> {
        check_page(template, self.cols_page, self.rows_page, self.fig_width, self.fig_height)?;
        check_limits(template, self.y_lims)?;
        if self.figure_dpi == 0 {
            return Err(config_error(template, "figure_dpi", "must be positive"));
        }
        self.threshold_params()
            .validate()
            .map_err(|e| {
                config_error(template, "threshold_std/threshold_population", e.to_string())
            })?;

        let colors = [
            ("y_grid_color", &self.y_grid_color),
            ("measured_color", &self.measured_color),
            ("missing_color", &self.missing_color),
            ("unassigned_color", &self.unassigned_color),
            ("threshold_color", &self.threshold_color),
            ("theo_pre_color", &self.theo_pre_color),
            ("tag_cartoon_color", &self.tag_cartoon_color),
        ];
        for (key, value) in colors {
            check_color(template, key, value)?;
        }
        for value in self.user_bar_colors_dict.values() {
            check_color(template, "user_bar_colors_dict", value)?;
        }
        Ok(())
    }

    /// Pretty JSON of this configuration, keys sorted.
    pub fn to_json_pretty(&self) -> Result<String> {
        to_sorted_json(self)
    }
}

/// Configuration of the parameter evolution template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EvolutionConfig {
    pub cols_page: usize,
    pub rows_page: usize,

    pub y_lims: (f64, f64),
    pub hspace: f64,
    pub wspace: f64,

    pub subtitle_fn: String,
    pub subtitle_fs: f64,
    pub subtitle_pad: f64,
    pub subtitle_weight: String,

    pub x_label_fn: String,
    pub x_label_fs: f64,
    pub x_label_pad: f64,
    pub x_label_weight: String,
    pub x_label: String,

    pub y_label_fn: String,
    pub y_label_fs: f64,
    pub y_label_pad: f64,
    pub y_label_weight: String,
    pub y_label: String,

    /// Titration point labels; numeric labels also place the points.
    /// Empty means positions `0, 1, 2, ...`.
    pub titration_x_values: Vec<String>,
    pub x_ticks_fn: String,
    pub x_ticks_fs: f64,
    pub x_ticks_pad: f64,
    pub x_ticks_weight: String,
    pub x_ticks_rot: f64,
    pub x_ticks_len: f64,
    /// Tick intervals along numeric titration values.
    pub x_ticks_nbins: usize,

    pub y_ticks_fn: String,
    pub y_ticks_fs: f64,
    pub y_ticks_pad: f64,
    pub y_ticks_weight: String,
    pub y_ticks_rot: f64,
    pub y_ticks_len: f64,
    pub y_ticks_nbins: usize,

    pub line_style: String,
    pub line_width: f64,
    pub line_color: String,

    pub marker_style: String,
    pub marker_color: String,
    pub marker_size: f64,

    pub fill_between: bool,
    pub fill_color: String,
    pub fill_alpha: f64,

    pub fit_line_color: String,
    pub fit_line_width: f64,
    pub fit_line_style: String,

    pub header_fontsize: f64,

    pub figure_path: PathBuf,
    pub figure_dpi: u32,
    pub fig_height: f64,
    pub fig_width: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            cols_page: 5,
            rows_page: 8,
            y_lims: (0.0, 0.3),
            hspace: 0.5,
            wspace: 0.5,
            subtitle_fn: "Arial".to_string(),
            subtitle_fs: 8.0,
            subtitle_pad: 0.98,
            subtitle_weight: "normal".to_string(),
            x_label_fn: "Arial".to_string(),
            x_label_fs: 6.0,
            x_label_pad: 2.0,
            x_label_weight: "normal".to_string(),
            x_label: "ligand ratio".to_string(),
            y_label_fn: "Arial".to_string(),
            y_label_fs: 6.0,
            y_label_pad: 2.0,
            y_label_weight: "normal".to_string(),
            y_label: "CSPs".to_string(),
            titration_x_values: Vec::new(),
            x_ticks_fn: "Arial".to_string(),
            x_ticks_fs: 5.0,
            x_ticks_pad: 1.0,
            x_ticks_weight: "normal".to_string(),
            x_ticks_rot: 30.0,
            x_ticks_len: 2.0,
            x_ticks_nbins: 5,
            y_ticks_fn: "Arial".to_string(),
            y_ticks_fs: 5.0,
            y_ticks_pad: 1.0,
            y_ticks_weight: "normal".to_string(),
            y_ticks_rot: 0.0,
            y_ticks_len: 2.0,
            y_ticks_nbins: 8,
            line_style: "-".to_string(),
            line_width: 1.0,
            line_color: "red".to_string(),
            marker_style: "o".to_string(),
            marker_color: "darkred".to_string(),
            marker_size: 3.0,
            fill_between: true,
            fill_color: "pink".to_string(),
            fill_alpha: 0.5,
            fit_line_color: "black".to_string(),
            fit_line_width: 1.0,
            fit_line_style: "-".to_string(),
            header_fontsize: 5.0,
            figure_path: PathBuf::from("plot_parameter_evolution.svg"),
            figure_dpi: 300,
            fig_height: 11.69,
            fig_width: 8.69,
        }
    }
}

impl EvolutionConfig {
    /// Template name used in error messages.
    pub const TEMPLATE: &'static str = "Parameter Evolution";

    /// Merges validated overrides into this configuration.
    pub fn with_overrides(&self, overrides: &Map<String, Value>) -> Result<Self> {
        let merged = apply_overrides(self, overrides, Self::TEMPLATE)?;
        merged.validate()?;
        Ok(merged)
    }

    /// Sets the output path.
    #[must_use]
    pub fn with_figure_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.figure_path = path.into();
        self
    }

    /// Sets the titration point labels.
    #[must_use]
    pub fn with_titration_x_values(mut self, values: Vec<String>) -> Self {
        self.titration_x_values = values;
        self
    }

    /// Checks semantic constraints the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        let template = Self::TEMPLATE;
        check_page(template, self.cols_page, self.rows_page, self.fig_width, self.fig_height)?;
        check_limits(template, self.y_lims)?;
        if self.figure_dpi == 0 {
            return Err(config_error(template, "figure_dpi", "must be positive"));
        }
        let colors = [
            ("line_color", &self.line_color),
            ("marker_color", &self.marker_color),
            ("fill_color", &self.fill_color),
            ("fit_line_color", &self.fit_line_color),
        ];
        for (key, value) in colors {
            check_color(template, key, value)?;
        }
        Ok(())
    }

    /// Pretty JSON of this configuration, keys sorted.
    pub fn to_json_pretty(&self) -> Result<String> {
        to_sorted_json(self)
    }
}

/// Reads a JSON object of overrides from a file.
pub fn load_overrides(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::Config {
            template: "any".to_string(),
            key: path.display().to_string(),
            reason: format!("overrides must be a JSON object, found {}", json_kind(&other)),
        }),
    }
}

/// Merges `overrides` into `defaults`, key by key.
///
/// Every key must exist in the serialized defaults and carry a value of
/// the same JSON kind. Each merged key is deserialized immediately so
/// narrowing errors (e.g. `2.5` for an integer option) name the key.
pub fn apply_overrides<T>(defaults: &T, overrides: &Map<String, Value>, template: &str) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut base = match serde_json::to_value(defaults)? {
        Value::Object(map) => map,
        other => {
            return Err(config_error(
                template,
                "*",
                format!("defaults serialize to {}", json_kind(&other)),
            ));
        }
    };

    for (key, value) in overrides {
        let Some(current) = base.get(key) else {
            return Err(config_error(template, key, "is not a known option"));
        };
        if json_kind(current) != json_kind(value) {
            return Err(config_error(
                template,
                key,
                format!(
                    "is not of correct type, is {}, should be {}",
                    json_kind(value),
                    json_kind(current)
                ),
            ));
        }
        base.insert(key.clone(), value.clone());
        serde_json::from_value::<T>(Value::Object(base.clone()))
            .map_err(|e| config_error(template, key, e.to_string()))?;
    }

    Ok(serde_json::from_value(Value::Object(base))?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn to_sorted_json<T: Serialize>(config: &T) -> Result<String> {
    // serde_json maps are ordered by key without the preserve_order feature.
    let value = serde_json::to_value(config)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn config_error(template: &str, key: &str, reason: impl Into<String>) -> Error {
    Error::Config {
        template: template.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn check_page(template: &str, cols: usize, rows: usize, width: f64, height: f64) -> Result<()> {
    if cols == 0 {
        return Err(config_error(template, "cols_page", "must be positive"));
    }
    if rows == 0 {
        return Err(config_error(template, "rows_page", "must be positive"));
    }
    if !(width > 0.0 && height > 0.0) {
        return Err(config_error(template, "fig_width/fig_height", "must be positive"));
    }
    Ok(())
}

fn check_limits(template: &str, lims: (f64, f64)) -> Result<()> {
    if !(lims.0.is_finite() && lims.1.is_finite() && lims.0 < lims.1) {
        return Err(config_error(
            template,
            "y_lims",
            format!("must be finite and increasing, is {:?}", lims),
        ));
    }
    Ok(())
}

fn check_color(template: &str, key: &str, value: &str) -> Result<()> {
    if color::is_hex(value) {
        color::hex_to_rgb(value).map_err(|e| config_error(template, key, e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn overrides(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_template_defaults() {
        let compacted = BarPlotConfig::compacted();
        assert_eq!((compacted.cols_page, compacted.rows_page), (3, 5));
        assert!(!compacted.x_ticks_color_flag);

        let extended = BarPlotConfig::extended();
        assert_eq!((extended.cols_page, extended.rows_page), (1, 6));
        assert_eq!(extended.x_ticks_rot, 90.0);

        let vertical = BarPlotConfig::extended_vertical();
        assert_eq!((vertical.cols_page, vertical.rows_page), (5, 2));
        assert_eq!(vertical.y_ticks_rot, 45.0);
        assert_eq!(vertical.x_ticks_fn, "monospace");
    }

    #[test]
    fn test_overrides_merge() {
        let config = BarPlotConfig::compacted()
            .with_overrides(
                "Compacted Bar",
                &overrides(json!({
                    "figure_dpi": 100,
                    "threshold_color": "#00ff00",
                    "threshold_source": "displayed",
                    "user_marks_dict": {"yell": "y"}
                })),
            )
            .unwrap();

        assert_eq!(config.figure_dpi, 100);
        assert_eq!(config.threshold_color, "#00ff00");
        assert_eq!(config.threshold_source, ThresholdSource::Displayed);
        assert_eq!(config.user_marks_dict.get("yell").map(String::as_str), Some("y"));
        assert_eq!(config.x_label, "Residues");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = BarPlotConfig::compacted()
            .with_overrides("Compacted Bar", &overrides(json!({"treshold_flag": false})))
            .unwrap_err();
        assert!(matches!(err, Error::Config { ref key, .. } if key == "treshold_flag"));
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let err = BarPlotConfig::compacted()
            .with_overrides("Compacted Bar", &overrides(json!({"threshold_flag": "yes"})))
            .unwrap_err();
        assert!(matches!(err, Error::Config { ref key, .. } if key == "threshold_flag"));
    }

    #[test]
    fn test_narrowing_rejected() {
        let err = BarPlotConfig::compacted()
            .with_overrides("Compacted Bar", &overrides(json!({"cols_page": 2.5})))
            .unwrap_err();
        assert!(matches!(err, Error::Config { ref key, .. } if key == "cols_page"));
    }

    #[test]
    fn test_semantic_validation() {
        let bad_limits = BarPlotConfig::compacted()
            .with_overrides("Compacted Bar", &overrides(json!({"y_lims": [0.3, 0.0]})));
        assert!(bad_limits.is_err());

        let bad_color = BarPlotConfig::compacted()
            .with_overrides("Compacted Bar", &overrides(json!({"missing_color": "#12"})));
        assert!(bad_color.is_err());

        let bad_population = BarPlotConfig::compacted()
            .with_overrides("Compacted Bar", &overrides(json!({"threshold_population": 0})));
        assert!(bad_population.is_err());
    }

    #[test]
    fn test_json_roundtrip_is_sorted() {
        let json = BarPlotConfig::extended().to_json_pretty().unwrap();
        let bar_alpha = json.find("\"bar_alpha\"").unwrap();
        let y_lims = json.find("\"y_lims\"").unwrap();
        assert!(bar_alpha < y_lims);

        let parsed: BarPlotConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, BarPlotConfig::extended());
    }

    #[test]
    fn test_evolution_overrides() {
        let config = EvolutionConfig::default()
            .with_overrides(&overrides(json!({
                "titration_x_values": ["0", "0.5", "1"],
                "fill_between": false
            })))
            .unwrap();
        assert_eq!(config.titration_x_values.len(), 3);
        assert!(!config.fill_between);

        assert!(
            EvolutionConfig::default()
                .with_overrides(&overrides(json!({"rows_page": 0})))
                .is_err()
        );
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.json");
        std::fs::write(&path, r#"{"figure_dpi": 72}"#).unwrap();
        let map = load_overrides(&path).unwrap();
        assert_eq!(map.get("figure_dpi"), Some(&json!(72)));

        std::fs::write(&path, "[1, 2]").unwrap();
        assert!(load_overrides(&path).is_err());
    }
}
