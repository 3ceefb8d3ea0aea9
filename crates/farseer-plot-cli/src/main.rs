//! farseer-plot CLI - NMR titration figures

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use farseer_plot::BarTemplate;
use log::LevelFilter;

mod commands;

/// Plot templates and significance statistics for NMR titration data.
#[derive(Parser)]
#[command(name = "farseer-plot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a bar plot, one subplot per titration point
    Bar {
        /// Template: compacted, extended or extended-vertical
        #[arg(short, long, default_value = "compacted")]
        template: BarTemplate,

        /// Input CSV, one row per titration point
        #[arg(short, long)]
        input: PathBuf,

        /// Output SVG file (defaults to the template's figure_path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file of configuration overrides
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Figure header
        #[arg(long, default_value = "")]
        header: String,

        /// CSV of peak status (measured, missing, unassigned), same shape as input
        #[arg(long)]
        peak_status: Option<PathBuf>,

        /// CSV of user details, same shape as input
        #[arg(long)]
        details: Option<PathBuf>,
    },

    /// Draw a parameter evolution grid, one subplot per residue
    Evolution {
        /// Input CSV, one row per titration point
        #[arg(short, long)]
        input: PathBuf,

        /// Output SVG file (defaults to the template's figure_path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file of configuration overrides
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Figure header
        #[arg(long, default_value = "")]
        header: String,

        /// CSV of peak status, same shape as input
        #[arg(long)]
        peak_status: Option<PathBuf>,
    },

    /// Print significance thresholds of each titration point
    Threshold {
        /// Input CSV, one row per titration point
        #[arg(short, long)]
        input: PathBuf,

        /// Standard deviations above the mean
        #[arg(long, default_value_t = 5.0)]
        std: f64,

        /// Fraction of the smallest values used for the statistics
        #[arg(long, default_value_t = 0.1)]
        population: f64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the category ticks a bar template would draw
    Ticks {
        /// Input CSV; only the header labels are used
        #[arg(short, long)]
        input: PathBuf,

        /// Template: compacted, extended or extended-vertical
        #[arg(short, long, default_value = "compacted")]
        template: BarTemplate,
    },

    /// Print a template's default configuration as JSON
    Config {
        /// compacted, extended, extended-vertical or evolution
        #[arg(short, long, default_value = "compacted")]
        template: String,
    },

    /// Print a formatted WET message
    Wet {
        /// Message title
        #[arg(long)]
        title: String,

        /// Message body
        #[arg(short, long)]
        message: String,

        /// WET number, appended to the wiki link
        #[arg(long)]
        code: u32,

        /// Box width in characters
        #[arg(long, default_value_t = 70)]
        width: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Bar {
            template,
            input,
            output,
            config,
            header,
            peak_status,
            details,
        } => commands::bar::run(
            template,
            &commands::bar::Inputs {
                values: input,
                peak_status,
                details,
            },
            output,
            config,
            &header,
        ),
        Commands::Evolution {
            input,
            output,
            config,
            header,
            peak_status,
        } => commands::evolution::run(input, peak_status, output, config, &header),
        Commands::Threshold {
            input,
            std,
            population,
            json,
        } => commands::threshold::run(input, std, population, json),
        Commands::Ticks { input, template } => commands::ticks::run(input, template),
        Commands::Config { template } => commands::config::run(&template),
        Commands::Wet {
            title,
            message,
            code,
            width,
        } => commands::wet::run(&title, &message, code, width),
    }
}
