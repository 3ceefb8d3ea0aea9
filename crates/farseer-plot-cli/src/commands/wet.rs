//! WET message command.

use anyhow::Result;
use farseer_plot::WetHandler;

pub fn run(title: &str, message: &str, code: u32, width: usize) -> Result<()> {
    print!("{}", WetHandler::new(title, message, code).with_width(width).generate());
    Ok(())
}
