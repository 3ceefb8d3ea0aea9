//! Plot templates and the rendering surface they draw on.
//!
//! A template turns a values matrix into a list of [`Subplot`] scenes laid
//! out on a [`FigureLayout`] grid. Scenes are plain data in axis
//! coordinates; a [`RenderSurface`] turns them into a file.
//!
//! Scene coordinates are `(category, value)`: the category axis carries the
//! bars (or the titration points) and the value axis carries their heights.
//! [`Orientation`] decides which of the two is drawn horizontally.
//!
//! ## Templates
//!
//! - [`bar`]: compacted, extended and extended vertical bar plots
//! - [`evolution`]: per-residue parameter evolution plot
//!
//! ## Surfaces
//!
//! - [`svg::SvgSurface`]: writes SVG documents

pub mod bar;
pub mod evolution;
pub mod experiment;
pub mod svg;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of subplot rows needed for `num_subplots` at `cols_page` columns.
///
/// One spare row is always added, matching the page grid the templates
/// have always used.
///
/// ```
/// use farseer_plot::plot::calc_num_rows;
///
/// assert_eq!(calc_num_rows(10, 3), 5);
/// assert_eq!(calc_num_rows(9, 3), 4);
/// ```
#[must_use]
pub fn calc_num_rows(num_subplots: usize, cols_page: usize) -> usize {
    num_subplots.div_ceil(cols_page.max(1)) + 1
}

/// Real figure height in inches for `num_rows` rows when a page of
/// `fig_height` inches holds `rows_page` rows.
#[must_use]
pub fn calc_real_fig_height(rows_page: usize, num_rows: usize, fig_height: f64) -> f64 {
    fig_height / rows_page.max(1) as f64 * num_rows as f64
}

/// Subplot grid of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    /// Subplots actually drawn; later grid slots stay empty.
    pub num_subplots: usize,
    /// Grid rows.
    pub num_rows: usize,
    /// Grid columns.
    pub num_cols: usize,
    /// Figure width in inches.
    pub width: f64,
    /// Figure height in inches.
    pub height: f64,
    /// Vertical space between subplots, as a fraction of subplot height.
    pub hspace: f64,
    /// Horizontal space between subplots, as a fraction of subplot width.
    pub wspace: f64,
}

impl FigureLayout {
    /// Computes the grid for `num_subplots` subplots.
    pub fn new(
        num_subplots: usize,
        rows_page: usize,
        cols_page: usize,
        fig_height: f64,
        fig_width: f64,
    ) -> Result<Self> {
        if rows_page == 0 || cols_page == 0 {
            return Err(Error::invalid_parameter(
                "rows_page/cols_page",
                "must be positive",
            ));
        }
        let num_rows = calc_num_rows(num_subplots, cols_page);
        let height = calc_real_fig_height(rows_page, num_rows, fig_height);
        log::debug!(
            "Figure grid: {} subplots on {}x{}, {:.2}x{:.2} in",
            num_subplots,
            num_rows,
            cols_page,
            fig_width,
            height
        );
        Ok(Self {
            num_subplots,
            num_rows,
            num_cols: cols_page,
            width: fig_width,
            height,
            hspace: 0.5,
            wspace: 0.5,
        })
    }

    /// Sets the spacing between subplots.
    #[must_use]
    pub fn with_spacing(mut self, hspace: f64, wspace: f64) -> Self {
        self.hspace = hspace;
        self.wspace = wspace;
        self
    }

    /// Number of grid slots.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.num_rows * self.num_cols
    }

    /// Grid `(row, column)` of a slot.
    #[must_use]
    pub fn position(&self, slot: usize) -> (usize, usize) {
        (slot / self.num_cols, slot % self.num_cols)
    }
}

/// Which way the bars grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Categories along x, values up the y axis.
    #[default]
    Vertical,
    /// Categories down the y axis, values along x.
    Horizontal,
}

/// Font settings of a text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: String,
    /// Size in points.
    pub size: f64,
    pub weight: String,
    /// Counter-clockwise rotation in degrees.
    pub rotation: f64,
    pub color: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: "Arial".to_string(),
            size: 6.0,
            weight: "normal".to_string(),
            rotation: 0.0,
            color: "black".to_string(),
        }
    }
}

impl TextStyle {
    /// Style with the given font, size and weight.
    #[must_use]
    pub fn new(font: &str, size: f64, weight: &str) -> Self {
        Self {
            font: font.to_string(),
            size,
            weight: weight.to_string(),
            ..Self::default()
        }
    }

    /// Sets the rotation.
    #[must_use]
    pub fn rotated(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Stroke settings of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    /// Width in points.
    pub width: f64,
    /// One of `-`, `--`, `:` or `-.`.
    pub dash: String,
    pub alpha: f64,
}

impl LineStyle {
    /// Solid opaque line.
    #[must_use]
    pub fn solid(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: "-".to_string(),
            alpha: 1.0,
        }
    }

    /// Sets the dash pattern.
    #[must_use]
    pub fn dashed(mut self, dash: &str) -> Self {
        self.dash = dash.to_string();
        self
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// An axis tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Position in axis coordinates.
    pub position: f64,
    pub label: String,
    /// Label colour; the axis tick style colour when `None`.
    pub color: Option<String>,
}

/// An axis of a subplot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub label: String,
    pub label_style: TextStyle,
    /// Distance between tick labels and axis label, in points.
    pub label_pad: f64,
    pub min: f64,
    pub max: f64,
    /// Runs from max to min.
    pub inverted: bool,
    pub ticks: Vec<Tick>,
    pub tick_style: TextStyle,
    /// Tick length in points.
    pub tick_len: f64,
    /// Distance between tick and its label, in points.
    pub tick_pad: f64,
}

impl Axis {
    /// Axis spanning `min..max` with no ticks.
    #[must_use]
    pub fn new(label: &str, min: f64, max: f64) -> Self {
        Self {
            label: label.to_string(),
            label_style: TextStyle::default(),
            label_pad: 2.0,
            min,
            max,
            inverted: false,
            ticks: Vec::new(),
            tick_style: TextStyle::default(),
            tick_len: 2.0,
            tick_pad: 1.0,
        }
    }

    /// Length of the axis range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// `nbins` equal intervals over `min..=max`, labelled with two decimals.
#[must_use]
pub fn linear_ticks(min: f64, max: f64, nbins: usize) -> Vec<Tick> {
    let nbins = nbins.max(1);
    (0..=nbins)
        .map(|i| {
            let position = min + (max - min) * i as f64 / nbins as f64;
            Tick {
                position,
                label: format!("{position:.2}"),
                color: None,
            }
        })
        .collect()
}

/// A bar rising from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Centre on the category axis.
    pub position: f64,
    pub value: f64,
    pub color: String,
}

/// A line across the whole category axis at a fixed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub style: LineStyle,
    /// Drawing order; higher is drawn later.
    pub zorder: i32,
}

/// Where a text mark sits relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkAnchor {
    /// Past the anchor in the positive value direction.
    Positive,
    /// Past the anchor in the negative value direction.
    Negative,
    /// Centred on the anchor.
    Centered,
}

/// Short text placed at the end of a bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMark {
    pub position: f64,
    pub value: f64,
    pub text: String,
    pub anchor: MarkAnchor,
    pub size: f64,
}

/// Point marker of a polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// `o` circle, `s` square, `^` triangle; anything else draws a circle.
    pub shape: String,
    pub color: String,
    /// Size in points.
    pub size: f64,
}

/// Area between a polyline and zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: String,
    pub alpha: f64,
}

/// Connected points in `(category, value)` coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<(f64, f64)>,
    pub style: LineStyle,
    pub marker: Option<MarkerStyle>,
    pub fill: Option<Fill>,
    pub zorder: i32,
}

/// Paramagnetic tag cartoon: a stroke from zero to `height` at `position`
/// topped with a red dot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagMarker {
    pub position: f64,
    pub height: f64,
    pub style: LineStyle,
}

/// Horizontal alignment of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    /// Text starts at the anchor and hangs below it.
    TopLeft,
    /// Text is centred on the anchor.
    Center,
}

/// Free text in `(category, value)` coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub position: (f64, f64),
    pub text: String,
    pub size: f64,
    pub align: TextAlign,
}

/// Everything drawn in one subplot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subplot {
    pub title: String,
    pub title_style: TextStyle,
    /// Title offset above the axes, as a fraction of the axes height.
    pub title_pad: f64,
    pub orientation: Orientation,
    pub category_axis: Axis,
    pub value_axis: Axis,
    /// Grid lines at the value ticks.
    pub value_grid: Option<LineStyle>,
    /// Bar thickness in category units.
    pub bar_width: f64,
    pub bar_alpha: f64,
    /// Outline width in points; 0 draws no outline.
    pub bar_linewidth: f64,
    pub bars: Vec<Bar>,
    pub reference_lines: Vec<ReferenceLine>,
    pub marks: Vec<TextMark>,
    pub polylines: Vec<Polyline>,
    pub tags: Vec<TagMarker>,
    pub annotations: Vec<Annotation>,
}

impl Subplot {
    /// Empty subplot over the given axes.
    #[must_use]
    pub fn new(
        title: &str,
        orientation: Orientation,
        category_axis: Axis,
        value_axis: Axis,
    ) -> Self {
        Self {
            title: title.to_string(),
            title_style: TextStyle::default(),
            title_pad: 0.99,
            orientation,
            category_axis,
            value_axis,
            value_grid: None,
            bar_width: 0.8,
            bar_alpha: 1.0,
            bar_linewidth: 0.0,
            bars: Vec::new(),
            reference_lines: Vec::new(),
            marks: Vec::new(),
            polylines: Vec::new(),
            tags: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

/// Backend that turns subplot scenes into a figure file.
///
/// A figure is drawn in three steps: [`draw`](Self::draw) creates an empty
/// canvas for the grid, [`draw_subplot`](Self::draw_subplot) fills one slot
/// and [`save`](Self::save) writes the canvas with its header text.
pub trait RenderSurface {
    /// In-progress figure.
    type Canvas;

    /// Creates an empty canvas for `layout`.
    fn draw(&self, layout: &FigureLayout) -> Result<Self::Canvas>;

    /// Draws `subplot` into grid slot `slot`.
    fn draw_subplot(&self, canvas: &mut Self::Canvas, slot: usize, subplot: &Subplot) -> Result<()>;

    /// Writes the canvas to `path`.
    fn save(&self, canvas: Self::Canvas, path: &Path, header: &Header, dpi: u32) -> Result<()>;
}

/// Free text printed in the bottom-left corner of a figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub text: String,
    pub font_size: f64,
}

impl Header {
    #[must_use]
    pub fn new(text: impl Into<String>, font_size: f64) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }
}

/// Draws `subplots` on a fresh canvas and saves it.
///
/// Subplots beyond the layout's slots are an error; slots beyond the
/// subplots are left empty.
pub fn render<S: RenderSurface>(
    surface: &S,
    layout: &FigureLayout,
    subplots: &[Subplot],
    path: &Path,
    header: &Header,
    dpi: u32,
) -> Result<()> {
    if subplots.len() > layout.slots() {
        return Err(Error::Render(format!(
            "{} subplots do not fit a {}x{} grid",
            subplots.len(),
            layout.num_rows,
            layout.num_cols
        )));
    }
    let mut canvas = surface.draw(layout)?;
    for (slot, subplot) in subplots.iter().enumerate() {
        surface.draw_subplot(&mut canvas, slot, subplot)?;
    }
    surface.save(canvas, path, header, dpi)?;
    log::info!("Saved plot figure {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_num_rows() {
        assert_eq!(calc_num_rows(0, 3), 1);
        assert_eq!(calc_num_rows(1, 3), 2);
        assert_eq!(calc_num_rows(3, 3), 2);
        assert_eq!(calc_num_rows(4, 3), 3);
        assert_eq!(calc_num_rows(6, 1), 7);
    }

    #[test]
    fn test_calc_real_fig_height() {
        assert!((calc_real_fig_height(5, 10, 11.69) - 23.38).abs() < 1e-9);
        assert!((calc_real_fig_height(2, 1, 10.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_figure_layout() {
        let layout = FigureLayout::new(7, 5, 3, 11.69, 8.69).unwrap();
        assert_eq!(layout.num_rows, 4);
        assert_eq!(layout.num_cols, 3);
        assert_eq!(layout.slots(), 12);
        assert_eq!(layout.position(4), (1, 1));
        assert!((layout.height - 11.69 / 5.0 * 4.0).abs() < 1e-9);

        assert!(FigureLayout::new(7, 0, 3, 11.69, 8.69).is_err());
    }

    #[test]
    fn test_linear_ticks() {
        let ticks = linear_ticks(0.0, 0.3, 3);
        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0.00", "0.10", "0.20", "0.30"]);
        assert_eq!(linear_ticks(0.0, 1.0, 0).len(), 2);
    }
}
