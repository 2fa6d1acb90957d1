//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use estimate_core::calculations::ProjectType;
use estimate_core::config::DEFAULT_CONFIG_FILE;

/// Smallest dimension the form accepts, in feet
const MIN_DIMENSION_FT: f64 = 1.0;

#[derive(Debug, Parser)]
#[command(name = "estimate", version, about = "Deck, patio and fence cost estimates")]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a project, optionally writing a PDF and saving the record
    Quote(QuoteArgs),
    /// List materials and their rates
    Materials {
        /// Only show materials for this project type
        #[arg(long, value_parser = parse_project_type)]
        project_type: Option<ProjectType>,
    },
    /// Check whether an address needs a permit notice
    Permit {
        /// Street address including ZIP code
        address: String,
    },
    /// Show saved estimate records
    History {
        /// Record log to read (defaults to the configured path)
        #[arg(long)]
        records: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Deck, Patio or Fence
    #[arg(long, value_parser = parse_project_type)]
    pub project_type: ProjectType,

    /// Length in feet
    #[arg(long, value_parser = parse_dimension)]
    pub length: f64,

    /// Width in feet (deck, patio)
    #[arg(long, value_parser = parse_dimension)]
    pub width: Option<f64>,

    /// Height in feet (fence)
    #[arg(long, value_parser = parse_dimension)]
    pub height: Option<f64>,

    /// Material (defaults to the first material for the project type)
    #[arg(long)]
    pub material: Option<String>,

    /// Markup percentage (markup pricing only)
    #[arg(long, value_parser = parse_markup)]
    pub markup: Option<f64>,

    /// Client name
    #[arg(long)]
    pub name: String,

    /// Client email
    #[arg(long)]
    pub email: String,

    /// Client phone
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Client street address
    #[arg(long)]
    pub address: String,

    /// Write the quote PDF to this path
    #[arg(long)]
    pub pdf: Option<PathBuf>,

    /// Skip the logo even if one is configured
    #[arg(long)]
    pub no_logo: bool,

    /// Append the estimate to the record log
    #[arg(long)]
    pub save: bool,

    /// Record log to append to (defaults to the configured path)
    #[arg(long)]
    pub records: Option<PathBuf>,
}

fn parse_project_type(s: &str) -> Result<ProjectType, String> {
    s.parse().map_err(|e: estimate_core::EstimateError| e.to_string())
}

fn parse_number(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not a finite number", s));
    }
    Ok(value)
}

fn parse_dimension(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;
    if value < MIN_DIMENSION_FT {
        return Err(format!("must be at least {} ft", MIN_DIMENSION_FT));
    }
    Ok(value)
}

fn parse_markup(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;
    if value < 0.0 {
        return Err("markup cannot be negative".to_string());
    }
    Ok(value)
}
