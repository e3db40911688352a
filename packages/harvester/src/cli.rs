//! Command-line interface for the harvester.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::harvester::{harvest, harvest_wfs, harvest_wms, HarvestOptions};
use crate::types::HarvestRecord;

/// GeoSync Harvester - Harvest dataset metadata from the Nijmegen geoserver.
#[derive(Parser)]
#[command(name = "geosync-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Harvest the geoserver and print or save the dataset records.
    Harvest {
        /// Geoserver base URL (default: the Nijmegen geoserver)
        #[arg(short, long)]
        base_url: Option<String>,

        /// URL of the taxonomy page listing the geoserver workspaces
        #[arg(short, long)]
        layers_uri: Option<String>,

        /// Which service to harvest
        #[arg(short, long, value_enum, default_value_t = ServiceArg::All)]
        service: ServiceArg,

        /// Write the records as JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Service selection for the harvest command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceArg {
    /// Harvest WFS and WMS, WFS first.
    All,

    /// Harvest only the WFS service.
    Wfs,

    /// Harvest only the WMS service.
    Wms,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Harvest {
            base_url,
            layers_uri,
            service,
            output,
        } => harvest_command(base_url, layers_uri, service, output.as_deref()),
    }
}

/// Execute the harvest command.
fn harvest_command(
    base_url: Option<String>,
    layers_uri: Option<String>,
    service: ServiceArg,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let defaults = HarvestOptions::default();
    let options = HarvestOptions {
        base_url: base_url.unwrap_or(defaults.base_url),
        layers_uri: layers_uri.unwrap_or(defaults.layers_uri),
    };

    println!(
        "{} {}",
        style("Harvesting").bold(),
        style(&options.base_url).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Fetching capabilities...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = match service {
        ServiceArg::All => harvest(&options),
        ServiceArg::Wfs => harvest_wfs(&options),
        ServiceArg::Wms => harvest_wms(&options),
    };

    let records = match result {
        Ok(records) => records,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Records: {}", style(records.len()).green());

    match output {
        Some(path) => {
            save_records(&records, path)?;
            println!();
            println!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => {
            for record in &records {
                println!(
                    "  {} {}",
                    style(record.dataset.geoserver_service.as_str()).dim(),
                    record.dataset.title
                );
            }
        }
    }

    Ok(())
}

/// Write the harvested records as pretty-printed JSON.
fn save_records(records: &[HarvestRecord], path: &std::path::Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}
