//! SVG rendering surface.
//!
//! Figures are written as standalone SVG documents sized in inches with a
//! point-based view box (72 points per inch), so font sizes and line widths
//! from the plot configurations carry over unchanged.

use std::fmt::Write as _;
use std::path::Path;

use super::{
    Axis, FigureLayout, Header, LineStyle, MarkAnchor, Orientation, RenderSurface, Subplot,
    TextAlign, TextStyle,
};
use crate::error::Result;

/// Points per inch.
const PT_PER_INCH: f64 = 72.0;

/// Writes figures as SVG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgSurface;

impl SvgSurface {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// SVG document being assembled.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    layout: FigureLayout,
    width: f64,
    height: f64,
    body: String,
}

impl SvgCanvas {
    /// Figure width in points.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Figure height in points.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Complete document with `header` in the bottom-left corner.
    #[must_use]
    pub fn finish(self, header: &Header) -> String {
        let mut svg = String::with_capacity(self.body.len() + 1024);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.2}in" height="{:.2}in" viewBox="0 0 {:.2} {:.2}">"#,
            self.layout.width, self.layout.height, self.width, self.height
        );
        let _ = writeln!(
            svg,
            r#"<rect class="background" width="{:.2}" height="{:.2}" fill="white"/>"#,
            self.width, self.height
        );
        svg.push_str(&self.body);

        if !header.text.is_empty() {
            let lines: Vec<&str> = header.text.lines().collect();
            let x = self.width * 0.01;
            let bottom = self.height * 0.99;
            let line_height = header.font_size * 1.2;
            for (i, line) in lines.iter().enumerate() {
                let y = bottom - (lines.len() - 1 - i) as f64 * line_height;
                let _ = writeln!(
                    svg,
                    r#"<text x="{:.2}" y="{:.2}" font-size="{:.2}" class="header">{}</text>"#,
                    x,
                    y,
                    header.font_size,
                    escape(line)
                );
            }
        }

        svg.push_str("</svg>\n");
        svg
    }
}

impl RenderSurface for SvgSurface {
    type Canvas = SvgCanvas;

    fn draw(&self, layout: &FigureLayout) -> Result<SvgCanvas> {
        Ok(SvgCanvas {
            layout: layout.clone(),
            width: layout.width * PT_PER_INCH,
            height: layout.height * PT_PER_INCH,
            body: String::with_capacity(8192),
        })
    }

    fn draw_subplot(&self, canvas: &mut SvgCanvas, slot: usize, subplot: &Subplot) -> Result<()> {
        let frame = Frame::for_slot(canvas, slot, subplot);
        draw_subplot(&mut canvas.body, slot, &frame, subplot);
        Ok(())
    }

    fn save(&self, canvas: SvgCanvas, path: &Path, header: &Header, dpi: u32) -> Result<()> {
        log::debug!("SVG output is resolution independent, dpi {} ignored", dpi);
        let svg = canvas.finish(header);
        std::fs::write(path, svg)?;
        Ok(())
    }
}

/// Screen placement of one subplot's axes.
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    orientation: Orientation,
    category: (f64, f64, bool),
    value: (f64, f64),
}

impl Frame {
    fn for_slot(canvas: &SvgCanvas, slot: usize, subplot: &Subplot) -> Self {
        let layout = &canvas.layout;
        let (row, col) = layout.position(slot);

        let area_left = canvas.width * 0.01;
        let area_top = canvas.height * 0.005;
        let cell_w = canvas.width * 0.985 / layout.num_cols as f64;
        let cell_h = canvas.height * 0.985 / layout.num_rows as f64;

        let width = cell_w / (1.0 + layout.wspace.max(0.0));
        let height = cell_h / (1.0 + layout.hspace.max(0.0));

        let c = &subplot.category_axis;
        let v = &subplot.value_axis;
        Self {
            left: area_left + col as f64 * cell_w + (cell_w - width) * 0.75,
            top: area_top + row as f64 * cell_h + (cell_h - height) * 0.35,
            width,
            height,
            orientation: subplot.orientation,
            category: (c.min, c.max, c.inverted),
            value: (v.min, v.max),
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Screen point of axis coordinates `(c, v)`.
    fn point(&self, c: f64, v: f64) -> (f64, f64) {
        let fc = fraction(c, self.category.0, self.category.1, self.category.2);
        let fv = fraction(v, self.value.0, self.value.1, false);
        match self.orientation {
            Orientation::Vertical => {
                (self.left + fc * self.width, self.top + (1.0 - fv) * self.height)
            }
            Orientation::Horizontal => {
                (self.left + fv * self.width, self.top + (1.0 - fc) * self.height)
            }
        }
    }
}

fn fraction(x: f64, min: f64, max: f64, inverted: bool) -> f64 {
    let span = max - min;
    let f = if span == 0.0 { 0.5 } else { (x - min) / span };
    if inverted { 1.0 - f } else { f }
}

/// Which frame edge an axis is drawn on.
#[derive(Clone, Copy)]
enum Edge {
    Bottom,
    Left,
}

fn draw_subplot(svg: &mut String, slot: usize, frame: &Frame, subplot: &Subplot) {
    let _ = writeln!(svg, r#"<g class="subplot" id="subplot{slot}">"#);
    let _ = writeln!(
        svg,
        r#"<clipPath id="axes{slot}"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath>"#,
        frame.left, frame.top, frame.width, frame.height
    );

    let (cat_edge, val_edge) = match subplot.orientation {
        Orientation::Vertical => (Edge::Bottom, Edge::Left),
        Orientation::Horizontal => (Edge::Left, Edge::Bottom),
    };

    let _ = writeln!(svg, r#"<g clip-path="url(#axes{slot})">"#);

    if let Some(grid) = &subplot.value_grid {
        for tick in &subplot.value_axis.ticks {
            value_line(svg, frame, tick.position, grid, "grid");
        }
    }

    for line in subplot.polylines.iter().filter(|l| l.fill.is_some()) {
        if let (Some(fill), Some(first), Some(last)) =
            (&line.fill, line.points.first(), line.points.last())
        {
            let mut points = String::new();
            for &(c, v) in line.points.iter().chain([(last.0, 0.0), (first.0, 0.0)].iter()) {
                let (x, y) = frame.point(c, v);
                let _ = write!(points, "{x:.2},{y:.2} ");
            }
            let _ = writeln!(
                svg,
                r#"<polygon points="{}" fill="{}" fill-opacity="{}" stroke="none"/>"#,
                points.trim_end(),
                escape(&fill.color),
                fill.alpha
            );
        }
    }

    let half = subplot.bar_width / 2.0;
    for bar in &subplot.bars {
        let (x0, y0) = frame.point(bar.position - half, 0.0);
        let (x1, y1) = frame.point(bar.position + half, bar.value);
        // Outlines take the bar colour.
        let outline = if subplot.bar_linewidth > 0.0 {
            format!(
                r#" stroke="{}" stroke-width="{}""#,
                escape(&bar.color),
                subplot.bar_linewidth
            )
        } else {
            String::new()
        };
        let _ = writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{}"{}/>"#,
            x0.min(x1),
            y0.min(y1),
            (x1 - x0).abs(),
            (y1 - y0).abs(),
            escape(&bar.color),
            subplot.bar_alpha,
            outline
        );
    }

    let mut lines: Vec<_> = subplot.polylines.iter().collect();
    lines.sort_by_key(|l| l.zorder);
    for line in lines {
        let mut path = String::new();
        for (i, &(c, v)) in line.points.iter().enumerate() {
            let (x, y) = frame.point(c, v);
            let prefix = if i == 0 { "M" } else { " L" };
            let _ = write!(path, "{prefix} {x:.2},{y:.2}");
        }
        if !path.is_empty() {
            let _ = writeln!(
                svg,
                r#"<path d="{}" fill="none"{}/>"#,
                path,
                stroke_attrs(&line.style)
            );
        }
        if let Some(marker) = &line.marker {
            for &(c, v) in &line.points {
                let (x, y) = frame.point(c, v);
                marker_shape(svg, x, y, marker.size / 2.0, &marker.shape, &marker.color);
            }
        }
    }

    let mut refs: Vec<_> = subplot.reference_lines.iter().collect();
    refs.sort_by_key(|l| l.zorder);
    for line in refs {
        value_line(svg, frame, line.value, &line.style, "threshold");
    }

    for tag in &subplot.tags {
        let (x0, y0) = frame.point(tag.position, 0.0);
        let (x1, y1) = frame.point(tag.position, tag.height);
        let _ = writeln!(
            svg,
            r#"<line x1="{x0:.2}" y1="{y0:.2}" x2="{x1:.2}" y2="{y1:.2}"{}/>"#,
            stroke_attrs(&tag.style)
        );
        let _ = writeln!(svg, r#"<circle cx="{x1:.2}" cy="{y1:.2}" r="1" fill="red"/>"#);
    }

    svg.push_str("</g>\n");

    let _ = writeln!(
        svg,
        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="black" stroke-width="0.8"/>"#,
        frame.left, frame.top, frame.width, frame.height
    );

    for mark in &subplot.marks {
        let (x, y) = frame.point(mark.position, mark.value);
        let (x, y, anchor) = match (subplot.orientation, mark.anchor) {
            (Orientation::Vertical, MarkAnchor::Negative) => (x, y + mark.size, "middle"),
            (Orientation::Vertical, MarkAnchor::Centered) => (x, y + mark.size / 3.0, "middle"),
            (Orientation::Vertical, MarkAnchor::Positive) => (x, y - 0.5, "middle"),
            (Orientation::Horizontal, MarkAnchor::Positive) => {
                (x + 0.5, y + mark.size / 3.0, "start")
            }
            (Orientation::Horizontal, MarkAnchor::Negative) => {
                (x - 0.5, y + mark.size / 3.0, "end")
            }
            (Orientation::Horizontal, MarkAnchor::Centered) => (x, y + mark.size / 3.0, "middle"),
        };
        let _ = writeln!(
            svg,
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}" font-size="{:.2}" class="mark">{}</text>"#,
            mark.size,
            escape(&mark.text)
        );
    }

    for note in &subplot.annotations {
        let (x, y) = frame.point(note.position.0, note.position.1);
        let (anchor, baseline) = match note.align {
            TextAlign::TopLeft => ("start", "hanging"),
            TextAlign::Center => ("middle", "middle"),
        };
        let _ = writeln!(
            svg,
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="{anchor}" dominant-baseline="{baseline}" font-size="{:.2}">{}</text>"#,
            note.size,
            escape(&note.text)
        );
    }

    axis(svg, frame, &subplot.category_axis, cat_edge, true);
    axis(svg, frame, &subplot.value_axis, val_edge, false);

    let title_y = frame.top + (1.0 - subplot.title_pad) * frame.height - 3.0;
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle"{}>{}</text>"#,
        frame.left + frame.width / 2.0,
        title_y,
        font_attrs(&subplot.title_style),
        escape(&subplot.title)
    );

    svg.push_str("</g>\n");
}

/// Line across the category axis at value `v`.
fn value_line(svg: &mut String, frame: &Frame, v: f64, style: &LineStyle, class: &str) {
    let (x0, y0) = frame.point(frame.category.0, v);
    let (x1, y1) = frame.point(frame.category.1, v);
    let _ = writeln!(
        svg,
        r#"<line x1="{x0:.2}" y1="{y0:.2}" x2="{x1:.2}" y2="{y1:.2}" class="{class}"{}/>"#,
        stroke_attrs(style)
    );
}

fn axis(svg: &mut String, frame: &Frame, axis: &Axis, edge: Edge, is_category: bool) {
    let style = &axis.tick_style;
    let mut widest = 0.0_f64;

    for tick in &axis.ticks {
        let (x, y) = if is_category {
            frame.point(tick.position, frame.value.0)
        } else {
            frame.point(frame.category.0, tick.position)
        };
        let color = tick.color.as_deref().unwrap_or(&style.color);
        let text = escape(&tick.label);

        match edge {
            Edge::Bottom => {
                let y0 = frame.bottom();
                let y1 = y0 + axis.tick_len;
                let ly = y1 + axis.tick_pad + style.size;
                let _ = writeln!(
                    svg,
                    r#"<line x1="{x:.2}" y1="{y0:.2}" x2="{x:.2}" y2="{y1:.2}" stroke="black" stroke-width="0.6"/>"#
                );
                let anchor = if style.rotation == 0.0 { "middle" } else { "end" };
                let _ = writeln!(
                    svg,
                    r#"<text x="{x:.2}" y="{ly:.2}" text-anchor="{anchor}" fill="{}"{}{}>{}</text>"#,
                    escape(color),
                    font_attrs(style),
                    rotate(style.rotation, x, ly),
                    text
                );
            }
            Edge::Left => {
                let x1 = frame.left;
                let x0 = x1 - axis.tick_len;
                let lx = x0 - axis.tick_pad;
                let ly = y + style.size / 3.0;
                let _ = writeln!(
                    svg,
                    r#"<line x1="{x0:.2}" y1="{y:.2}" x2="{x1:.2}" y2="{y:.2}" stroke="black" stroke-width="0.6"/>"#
                );
                let _ = writeln!(
                    svg,
                    r#"<text x="{lx:.2}" y="{ly:.2}" text-anchor="end" fill="{}"{}{}>{}</text>"#,
                    escape(color),
                    font_attrs(style),
                    rotate(style.rotation, lx, ly),
                    text
                );
            }
        }
        widest = widest.max(tick.label.chars().count() as f64 * style.size * 0.6);
    }

    if axis.label.is_empty() {
        return;
    }

    let label_style = &axis.label_style;
    let (x, y) = match edge {
        Edge::Bottom => (
            frame.left + frame.width / 2.0,
            frame.bottom()
                + axis.tick_len
                + axis.tick_pad
                + style.size
                + axis.label_pad
                + label_style.size,
        ),
        Edge::Left => (
            frame.left
                - axis.tick_len
                - axis.tick_pad
                - widest
                - axis.label_pad
                - label_style.size / 2.0,
            frame.top + frame.height / 2.0,
        ),
    };
    let _ = writeln!(
        svg,
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle"{}{}>{}</text>"#,
        font_attrs(label_style),
        rotate(label_style.rotation, x, y),
        escape(&axis.label)
    );
}

fn marker_shape(svg: &mut String, x: f64, y: f64, r: f64, shape: &str, color: &str) {
    let color = escape(color);
    match shape {
        "s" => {
            let _ = writeln!(
                svg,
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{color}"/>"#,
                x - r,
                y - r,
                2.0 * r,
                2.0 * r
            );
        }
        "^" => {
            let _ = writeln!(
                svg,
                r#"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="{color}"/>"#,
                x,
                y - r,
                x - r,
                y + r,
                x + r,
                y + r
            );
        }
        _ => {
            let _ = writeln!(svg, r#"<circle cx="{x:.2}" cy="{y:.2}" r="{r:.2}" fill="{color}"/>"#);
        }
    }
}

fn stroke_attrs(style: &LineStyle) -> String {
    let mut attrs = format!(
        r#" stroke="{}" stroke-width="{}" stroke-opacity="{}""#,
        escape(&style.color),
        style.width,
        style.alpha
    );
    let dash = match style.dash.as_str() {
        "--" => Some("4,2"),
        ":" => Some("1,2"),
        "-." => Some("4,2,1,2"),
        _ => None,
    };
    if let Some(dash) = dash {
        let _ = write!(attrs, r#" stroke-dasharray="{dash}""#);
    }
    attrs
}

fn font_attrs(style: &TextStyle) -> String {
    format!(
        r#" font-family="{}" font-size="{:.2}" font-weight="{}""#,
        escape(&style.font),
        style.size,
        escape(&style.weight)
    )
}

/// SVG rotates clockwise, plot configurations counter-clockwise.
fn rotate(degrees: f64, x: f64, y: f64) -> String {
    if degrees == 0.0 {
        String::new()
    } else {
        format!(r#" transform="rotate({:.2} {x:.2} {y:.2})""#, -degrees)
    }
}

/// Escapes XML special characters.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{Bar, ReferenceLine, Tick, linear_ticks};

    fn subplot(orientation: Orientation) -> Subplot {
        let mut category = Axis::new("Residues", -0.5, 2.5);
        category.ticks = vec![Tick {
            position: 0.0,
            label: "1<A>".to_string(),
            color: Some("red".to_string()),
        }];
        let mut value = Axis::new("CSPs", 0.0, 1.0);
        value.ticks = linear_ticks(0.0, 1.0, 4);

        let mut s = Subplot::new("first", orientation, category, value);
        s.bars = vec![
            Bar {
                position: 0.0,
                value: 0.5,
                color: "black".to_string(),
            },
            Bar {
                position: 1.0,
                value: 1.0,
                color: "red".to_string(),
            },
        ];
        s.reference_lines.push(ReferenceLine {
            value: 0.25,
            style: LineStyle::solid("red", 0.5),
            zorder: 10,
        });
        s
    }

    #[test]
    fn test_document_structure() {
        let surface = SvgSurface::new();
        let layout = FigureLayout::new(1, 2, 1, 10.0, 8.0).unwrap();
        let mut canvas = surface.draw(&layout).unwrap();
        surface
            .draw_subplot(&mut canvas, 0, &subplot(Orientation::Vertical))
            .unwrap();
        let svg = canvas.finish(&Header::new("run 1\nrun 2", 5.0));

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains(r#"viewBox="0 0 576.00 720.00""#));
        assert!(svg.contains("first"));
        assert!(svg.contains("1&lt;A&gt;"));
        assert!(svg.contains("run 2"));
        assert_eq!(svg.matches("class=\"threshold\"").count(), 1);
    }

    #[test]
    fn test_frame_orientation() {
        let surface = SvgSurface::new();
        let layout = FigureLayout::new(1, 2, 1, 10.0, 8.0).unwrap();
        let canvas = surface.draw(&layout).unwrap();

        let vertical = Frame::for_slot(&canvas, 0, &subplot(Orientation::Vertical));
        let (x0, y0) = vertical.point(0.0, 0.0);
        let (x1, y1) = vertical.point(0.0, 1.0);
        assert_eq!(x0, x1);
        assert!(y1 < y0);

        let mut sideways = subplot(Orientation::Horizontal);
        sideways.category_axis.inverted = true;
        let horizontal = Frame::for_slot(&canvas, 0, &sideways);
        let (x0, y0) = horizontal.point(-0.5, 0.0);
        let (x1, y1) = horizontal.point(2.5, 1.0);
        assert!(x1 > x0);
        assert!(y1 > y0);
    }

    #[test]
    fn test_bar_outline() {
        let surface = SvgSurface::new();
        let layout = FigureLayout::new(1, 2, 1, 10.0, 8.0).unwrap();

        let mut canvas = surface.draw(&layout).unwrap();
        surface.draw_subplot(&mut canvas, 0, &subplot(Orientation::Vertical)).unwrap();
        let plain = canvas.finish(&Header::default());
        assert!(!plain.contains(r#"fill-opacity="1" stroke="#));

        let mut outlined = subplot(Orientation::Vertical);
        outlined.bar_linewidth = 3.0;
        let mut canvas = surface.draw(&layout).unwrap();
        surface.draw_subplot(&mut canvas, 0, &outlined).unwrap();
        let svg = canvas.finish(&Header::default());
        assert!(svg.contains(r#"fill-opacity="1" stroke="black" stroke-width="3"/>"#));
        assert!(svg.contains(r#"fill-opacity="1" stroke="red" stroke-width="3"/>"#));
    }

    #[test]
    fn test_stroke_dash() {
        let style = LineStyle::solid("black", 1.0).dashed("--");
        assert!(stroke_attrs(&style).contains("stroke-dasharray=\"4,2\""));
        assert!(!stroke_attrs(&LineStyle::solid("black", 1.0)).contains("dasharray"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a&b<c>\"'"), "a&amp;b&lt;c&gt;&quot;&apos;");
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.svg");
        let surface = SvgSurface::new();
        let layout = FigureLayout::new(1, 1, 1, 2.0, 2.0).unwrap();
        let canvas = surface.draw(&layout).unwrap();
        surface.save(canvas, &path, &Header::default(), 300).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("</svg>"));
    }
}
