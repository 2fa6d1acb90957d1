//! # Remodel Estimator CLI
//!
//! Command line front end for `estimate_core`: takes the project and client
//! details, prints the estimate, and optionally writes the PDF quote and
//! appends the record log.
//!
//! ```text
//! estimate quote --project-type deck --length 10 --width 10 \
//!     --material "Pressure-treated wood" --markup 20 \
//!     --name "Jane Doe" --email jane@example.com --address "10 Light St, Baltimore MD 21202" \
//!     --pdf jane-deck.pdf --save
//! ```

mod cli;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use estimate_core::branding::{load_logo, LogoSource};
use estimate_core::calculations::{EstimateRequest, ProjectType};
use estimate_core::materials::{default_material, materials_for, MATERIAL_RATES};
use estimate_core::pdf::{humanize_key, render_quote_pdf};
use estimate_core::{write_document, ClientInfo, EstimateError, EstimatorConfig, Quote, RecordStore};

use crate::cli::{Cli, Command, QuoteArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("{:?}", e);
            eprintln!("Error: {:#}", e);
            if cli.json {
                if let Some(core_error) = e.downcast_ref::<EstimateError>() {
                    if let Ok(json) = serde_json::to_string_pretty(core_error) {
                        eprintln!("{}", json);
                    }
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = EstimatorConfig::load(&cli.config)?;

    match &cli.command {
        Command::Quote(args) => run_quote(args, &config, cli.json),
        Command::Materials { project_type } => {
            list_materials(*project_type, cli.json);
            Ok(())
        }
        Command::Permit { address } => {
            check_permit(address, &config, cli.json);
            Ok(())
        }
        Command::History { records } => {
            let store = RecordStore::new(records.clone().unwrap_or_else(|| config.records.path.clone()));
            show_history(&store, cli.json)
        }
    }
}

fn run_quote(args: &QuoteArgs, config: &EstimatorConfig, json: bool) -> anyhow::Result<()> {
    let material = args
        .material
        .clone()
        .unwrap_or_else(|| default_material(args.project_type).name.to_string());

    let request = EstimateRequest {
        project_type: args.project_type,
        length: args.length,
        width: args.width,
        height: args.height,
        material,
        markup_percent: args.markup.unwrap_or(config.pricing.default_markup_percent),
    };
    let client = ClientInfo::new(&args.name, &args.email, &args.phone, &args.address);

    let quote = Quote::prepare(client, request, config.pricing.policy, &config.permits)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&quote)?);
    } else {
        print_quote(&quote, config);
    }

    if let Some(pdf_path) = &args.pdf {
        let logo = if args.no_logo {
            None
        } else {
            config
                .branding
                .logo
                .as_deref()
                .and_then(|source| load_logo(&LogoSource::parse(source), config.branding.logo_timeout()))
        };

        let pdf = render_quote_pdf(&quote, &config.branding, logo.as_ref())?;
        write_document(pdf_path, &pdf)?;
        tracing::info!(path = %pdf_path.display(), bytes = pdf.len(), "wrote quote PDF");
        if !json {
            println!("PDF written to {}", pdf_path.display());
        }
    }

    if args.save {
        let store = RecordStore::new(args.records.clone().unwrap_or_else(|| config.records.path.clone()));
        store
            .append(&quote.client, &quote.result)
            .with_context(|| format!("could not save estimate to {}", store.path().display()))?;
        if !json {
            println!("Estimate saved to {}", store.path().display());
        }
    }

    Ok(())
}

fn print_quote(quote: &Quote, config: &EstimatorConfig) {
    println!("═══════════════════════════════════════");
    println!("  {}", quote.title().to_uppercase());
    println!("═══════════════════════════════════════");
    println!();
    println!("Client:   {}", quote.client.name);
    println!("Address:  {}", quote.client.address);
    println!("Material: {}", quote.material_label());
    println!("Pricing:  {}", config.pricing.policy.display_name());
    println!();
    for (key, value) in quote.result.fields() {
        println!("  {:<16} {}", format!("{}:", humanize_key(key)), value);
    }
    if let Some(notice) = &quote.permit_notice {
        println!();
        println!("Permit: {}", notice);
    }
    println!("═══════════════════════════════════════");
}

fn list_materials(project_type: Option<ProjectType>, json: bool) {
    let rates: Vec<_> = match project_type {
        Some(project_type) => materials_for(project_type).collect(),
        None => MATERIAL_RATES.iter().collect(),
    };

    if json {
        if let Ok(json) = serde_json::to_string_pretty(&rates) {
            println!("{}", json);
        }
        return;
    }

    for rate in rates {
        println!("{:<6} {:<22} ${:.2}/sqft", rate.project_type, rate.name, rate.rate.0);
    }
}

fn check_permit(address: &str, config: &EstimatorConfig, json: bool) {
    let zip = config.permits.matching_zip(address);
    if json {
        let report = serde_json::json!({
            "address": address,
            "requires_permit": zip.is_some(),
            "zip": zip,
            "jurisdiction": config.permits.jurisdiction,
        });
        println!("{}", report);
        return;
    }

    match config.permits.notice(address) {
        Some(notice) => println!("{}", notice),
        None => println!("No permit notice needed for this address."),
    }
}

fn show_history(store: &RecordStore, json: bool) -> anyhow::Result<()> {
    let log = store.read()?;

    if json {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = log
            .rows
            .iter()
            .map(|row| {
                log.header
                    .iter()
                    .cloned()
                    .zip(row.iter().map(|v| serde_json::Value::String(v.clone())))
                    .collect()
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", log.header.join(" | "));
    for row in &log.rows {
        println!("{}", row.join(" | "));
    }
    println!("{} saved estimate(s)", log.rows.len());
    Ok(())
}
