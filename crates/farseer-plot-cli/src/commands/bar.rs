//! Bar plot command.

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use farseer_plot::plot::bar;
use farseer_plot::{BarSeries, BarTemplate, SvgSurface};

use super::{read_overrides, read_strings, read_values};

/// Tables read by the bar command.
pub struct Inputs {
    pub values: PathBuf,
    pub peak_status: Option<PathBuf>,
    pub details: Option<PathBuf>,
}

pub fn run(
    template: BarTemplate,
    inputs: &Inputs,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    header: &str,
) -> Result<()> {
    log::info!("Loading values from: {}", inputs.values.display());
    let table = read_values(&inputs.values)?;

    let mut series = BarSeries::new(table.values, table.labels).with_suptitles(table.row_names);
    if let Some(path) = &inputs.peak_status {
        let status = read_strings(path)?;
        ensure!(
            status.values.dim() == series.values.dim(),
            "peak status table {} has shape {:?}, expected {:?}",
            path.display(),
            status.values.dim(),
            series.values.dim()
        );
        series = series.with_peak_status(status.values);
    }
    if let Some(path) = &inputs.details {
        series = series.with_details(read_strings(path)?.values);
    }

    let overrides = read_overrides(config.as_deref())?;
    let mut plot_config = template.default_config().with_overrides(template.name(), &overrides)?;
    if let Some(output) = output {
        plot_config = plot_config.with_figure_path(output);
    }

    bar::plot(&SvgSurface::new(), template, &series, &plot_config, header)
        .with_context(|| format!("Failed to plot {}", template.name()))?;

    println!("Wrote {}", plot_config.figure_path.display());
    Ok(())
}
