//! Default configuration command.

use anyhow::{Result, bail};
use farseer_plot::{BarTemplate, EvolutionConfig};

pub fn run(template: &str) -> Result<()> {
    let json = match template {
        "evolution" => EvolutionConfig::default().to_json_pretty()?,
        name => match name.parse::<BarTemplate>() {
            Ok(bar) => bar.default_config().to_json_pretty()?,
            Err(_) => bail!(
                "unknown template '{}', expected one of {}",
                name,
                "compacted, extended, extended-vertical, evolution"
            ),
        },
    };
    println!("{}", json);
    Ok(())
}
