//! Significance threshold command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use farseer_plot::{RowSummary, ThresholdParams};

use super::read_values;

pub fn run(input: PathBuf, std: f64, population: f64, json: bool) -> Result<()> {
    log::debug!("Loading values from: {}", input.display());
    let table = read_values(&input)?;
    let params = ThresholdParams::new(std, population);
    params.validate()?;

    let mut summaries = Vec::with_capacity(table.row_names.len());
    for (name, row) in table.row_names.iter().zip(table.values.rows()) {
        let summary = RowSummary::compute(row, &params)
            .with_context(|| format!("Failed to compute threshold of row '{}'", name))?;
        summaries.push((name, summary));
    }

    if json {
        let rows: serde_json::Map<String, serde_json::Value> = summaries
            .into_iter()
            .map(|(name, summary)| Ok((name.clone(), serde_json::to_value(summary)?)))
            .collect::<Result<_, serde_json::Error>>()?;
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Thresholds (mean + {} std of the smallest {:.0}%):", std, population * 100.0);
    println!("{:-<60}", "");
    println!(
        "{:<12} {:>8} {:>8} {:>10} {:>10} {:>8}",
        "Row", "Count", "Missing", "Threshold", "Max |v|", "Above"
    );
    println!("{:-<60}", "");
    for (name, summary) in &summaries {
        println!(
            "{:<12} {:>8} {:>8} {:>10.4} {:>10.4} {:>8}",
            name,
            summary.count,
            summary.missing,
            summary.threshold,
            summary.max_abs,
            summary.significant.len()
        );
    }
    Ok(())
}
