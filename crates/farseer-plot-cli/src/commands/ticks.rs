//! Category tick command.

use std::path::PathBuf;

use anyhow::Result;
use farseer_plot::BarTemplate;

use super::read_values;

pub fn run(input: PathBuf, template: BarTemplate) -> Result<()> {
    let table = read_values(&input)?;
    let selection = template.category_ticks(&table.labels)?;

    println!("{} of {} labels drawn by {}", selection.len(), table.labels.len(), template);
    if let Some(modulus) = selection.modulus {
        println!("Modulus: {} ({} rounds)", modulus, selection.rounds);
    }
    for (index, label) in selection.indices.iter().zip(&selection.labels) {
        println!("  {:>6}  {}", index, label);
    }
    Ok(())
}
