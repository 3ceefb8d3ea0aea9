//! # farseer-plot
//!
//! Plot templates and significance statistics for NMR titration data.
//!
//! Titration experiments produce one value per residue for every point of
//! the series. This library turns such matrices into publication figures:
//! bar plots with significance thresholds and parameter evolution grids,
//! rendered through a pluggable [`plot::RenderSurface`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use farseer_plot::config::BarPlotConfig;
//! use farseer_plot::plot::bar::{self, BarSeries, BarTemplate};
//! use farseer_plot::plot::svg::SvgSurface;
//! use ndarray::Array2;
//!
//! let values = Array2::from_shape_fn((3, 40), |(r, c)| 0.001 * (r * c) as f64);
//! let labels = (1..=40).map(|i| i.to_string()).collect();
//! let series = BarSeries::new(values, labels);
//!
//! let config = BarPlotConfig::compacted().with_figure_path("csps.svg");
//! bar::plot(&SvgSurface::new(), BarTemplate::Compacted, &series, &config, "CSPs")?;
//! # Ok::<(), farseer_plot::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`stats`]: Significance threshold and row statistics
//! - [`ticks`]: Category tick reduction for bar plots
//! - [`config`]: Typed template configuration with validated overrides
//! - [`plot`]: Figure layout, scene model, templates and SVG output
//! - [`validate`]: Shape and length checks of plot inputs
//! - [`import`]: CSV import of titration tables
//! - [`color`]: Hex/RGB conversion and gradients
//! - [`wet`]: Formatted user guidance messages

pub mod color;
pub mod config;
pub mod error;
pub mod import;
pub mod plot;
pub mod stats;
pub mod ticks;
pub mod validate;
pub mod wet;

// Re-export commonly used types
pub use config::{BarPlotConfig, EvolutionConfig, ThresholdSource};
pub use error::{Error, Result};
pub use import::{StringTable, TitrationTable};
pub use plot::bar::{BarSeries, BarTemplate};
pub use plot::evolution::EvolutionSeries;
pub use plot::svg::SvgSurface;
pub use plot::{FigureLayout, RenderSurface, Subplot};
pub use stats::{RowSummary, ThresholdParams, threshold_std_of_population};
pub use ticks::{TickSelection, compacted_bar_xticks, extended_bar_xticks};
pub use wet::WetHandler;
