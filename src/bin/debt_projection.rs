//! Project credit card debt growth and write chart data
//!
//! Cards come from `--card NAME:PRINCIPAL:APR` flags, a CSV file, or a JSON
//! params file. With none given, the default $1,000 card at 20% is used.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use debt_projection::card::{load_cards, parse_card_spec};
use debt_projection::{simulate, ChartData, SimulationParams};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "debt_projection",
    about = "Project unpaid credit card balances under monthly compounding"
)]
struct Args {
    /// Card as NAME:PRINCIPAL:APR_PERCENT (repeatable), e.g. "Visa:1500:22.9"
    #[arg(long = "card", value_name = "SPEC")]
    cards: Vec<String>,

    /// CSV file with columns name,principal,apr_percent
    #[arg(long, value_name = "PATH")]
    cards_file: Option<PathBuf>,

    /// JSON file with simulation params (cards, horizon_years, merged)
    #[arg(long, value_name = "PATH")]
    params: Option<PathBuf>,

    /// Years to project (1-30)
    #[arg(long)]
    years: Option<u32>,

    /// Show a single summed "Total Debt" series
    #[arg(long)]
    merged: bool,

    #[arg(long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Output file (stdout when omitted)
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn build_params(args: &Args) -> Result<SimulationParams> {
    let mut params = match &args.params {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open params file {}", path.display()))?;
            SimulationParams::from_json_reader(file)
                .with_context(|| format!("Failed to parse params file {}", path.display()))?
        }
        None => SimulationParams::default(),
    };

    let mut cards = Vec::new();
    if let Some(path) = &args.cards_file {
        let loaded = load_cards(path)
            .with_context(|| format!("Failed to load cards from {}", path.display()))?;
        cards.extend(loaded);
    }
    for spec in &args.cards {
        cards.push(parse_card_spec(spec, cards.len())?);
    }

    params.apply_overrides(cards, args.years, args.merged);
    Ok(params)
}

fn write_chart(chart: &ChartData, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Csv => chart.write_csv(&mut *out)?,
        OutputFormat::Json => writeln!(out, "{}", chart.to_json()?)?,
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    let args = Args::parse();

    let params = build_params(&args)?;
    info!(
        "Running {} cards over {} years (merged: {})",
        params.cards.len(),
        params.horizon_years,
        params.merged
    );

    let chart = simulate(&params).context("Simulation rejected its inputs")?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            write_chart(&chart, args.format, &mut BufWriter::new(file))?;
            eprintln!("Output written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_chart(&chart, args.format, &mut stdout.lock())?;
        }
    }

    eprintln!("\n{}", chart.title);
    eprintln!("  Balance after {} years:", params.horizon_years);
    for (label, balance) in chart.final_balances() {
        eprintln!("    {:<24} ${:.2}", label, balance);
    }
    info!("Total time: {:?}", start.elapsed());

    Ok(())
}
