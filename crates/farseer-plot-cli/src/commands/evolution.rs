//! Parameter evolution command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use farseer_plot::plot::evolution;
use farseer_plot::{EvolutionConfig, EvolutionSeries, SvgSurface};

use super::{read_overrides, read_strings, read_values};

pub fn run(
    input: PathBuf,
    peak_status: Option<PathBuf>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    header: &str,
) -> Result<()> {
    log::info!("Loading values from: {}", input.display());
    // One subplot per residue, one point per titration row.
    let table = read_values(&input)?.transposed();

    let mut series = EvolutionSeries::new(table.values).with_suptitles(table.row_names);
    if let Some(path) = peak_status {
        series = series.with_peak_status(read_strings(&path)?.values.reversed_axes());
    }

    let overrides = read_overrides(config.as_deref())?;
    let mut plot_config = EvolutionConfig::default().with_overrides(&overrides)?;
    if plot_config.titration_x_values.is_empty() {
        plot_config = plot_config.with_titration_x_values(table.labels);
    }
    if let Some(output) = output {
        plot_config = plot_config.with_figure_path(output);
    }

    evolution::plot(&SvgSurface::new(), &series, &plot_config, header)
        .with_context(|| format!("Failed to plot {}", EvolutionConfig::TEMPLATE))?;

    println!("Wrote {}", plot_config.figure_path.display());
    Ok(())
}
