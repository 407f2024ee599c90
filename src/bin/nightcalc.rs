use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Args, Parser};
use night_time_calculator::config::load_settings;
use night_time_calculator::geodesy::distance_nm;
use night_time_calculator::night::{self, NightThreshold};
use night_time_calculator::time::{minutes_to_hhmm, parse_hhmm};
use night_time_calculator::{AirportCatalog, resolve_airports};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Estimate night flying time for a logbook entry"
)]
struct Cli {
    /// Departure airport (ICAO or IATA, case-insensitive)
    #[arg(long)]
    from: String,

    /// Destination airport (ICAO or IATA, case-insensitive)
    #[arg(long)]
    to: String,

    /// Off-block time, RFC 3339 or `YYYY-MM-DD HH:MM` in UTC
    #[arg(long, value_parser = parse_departure)]
    depart: DateTime<Utc>,

    #[command(flatten)]
    block: BlockTime,

    /// Airport table (YAML list, TOML file or directory of TOML files)
    #[arg(long, default_value = "data/airports.yaml")]
    airports: PathBuf,

    /// Settings file providing the night angle
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Solar elevation in degrees below which it counts as night (overrides settings)
    #[arg(long, allow_hyphen_values = true)]
    night_angle: Option<f64>,

    /// Write the per-minute profile as JSON (`-` for stdout)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct BlockTime {
    /// Block time as hh:mm, h:mm, hhmm or hmm
    #[arg(long, value_parser = parse_block)]
    block: Option<u32>,

    /// Block time in minutes
    #[arg(long)]
    block_minutes: Option<u32>,
}

impl BlockTime {
    fn minutes(&self) -> u32 {
        self.block.or(self.block_minutes).unwrap_or_default()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let catalog = AirportCatalog::load(&cli.airports)
        .with_context(|| format!("loading airports from {}", cli.airports.display()))?;
    let threshold = resolve_threshold(&cli)?;
    let block_minutes = cli.block.minutes();

    let (dept, dest) = resolve_airports(&catalog, &cli.from, &cli.to)?;
    info!(from = %cli.from, to = %cli.to, "estimating night time");

    let summary = night::summarize(&dept, &dest, cli.depart, block_minutes, threshold)?;

    if let Some(path) = &cli.profile {
        let samples = night::minute_samples(&dept, &dest, cli.depart, block_minutes, threshold)?;
        write_profile(path, &samples)?;
        debug!(samples = samples.len(), "wrote minute profile");
        if path.as_os_str() == "-" {
            return Ok(());
        }
    }

    println!("=== Night Time ===");
    println!(
        "Route       : {} -> {} ({:.0} NM)",
        display_code(&catalog, &cli.from),
        display_code(&catalog, &cli.to),
        distance_nm(&dept, &dest)
    );
    println!("Departure   : {}", cli.depart.format("%Y-%m-%d %H:%M UTC"));
    println!("Block time  : {}", minutes_to_hhmm(summary.block_minutes));
    println!(
        "Night time  : {} (threshold {:.1}°)",
        minutes_to_hhmm(summary.night_minutes),
        threshold.degrees()
    );
    println!("Lighting    : {}", summary.lighting());

    Ok(())
}

fn resolve_threshold(cli: &Cli) -> anyhow::Result<NightThreshold> {
    let degrees = match (cli.night_angle, &cli.settings) {
        (Some(angle), _) => angle,
        (None, Some(path)) => {
            load_settings(path)
                .with_context(|| format!("loading settings from {}", path.display()))?
                .flight_logging
                .night_angle_deg
        }
        (None, None) => return Ok(NightThreshold::default()),
    };
    Ok(NightThreshold::new(degrees)?)
}

fn display_code(catalog: &AirportCatalog, code: &str) -> String {
    catalog
        .get(code)
        .map(|airport| airport.icao.clone())
        .unwrap_or_else(|| code.to_string())
}

fn write_profile(path: &Path, samples: &[night::MinuteSample]) -> anyhow::Result<()> {
    if path.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, samples)?;
        writeln!(out)?;
    } else {
        let file = File::create(path)
            .with_context(|| format!("creating profile {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, samples)?;
        writer.flush()?;
    }
    Ok(())
}

fn parse_departure(input: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(format!("`{input}` is not an RFC 3339 or `YYYY-MM-DD HH:MM` time"))
}

fn parse_block(input: &str) -> Result<u32, String> {
    match parse_hhmm(input) {
        Some(0) => Err("block time must be at least one minute".to_string()),
        Some(minutes) => Ok(minutes),
        None => Err(format!("`{input}` is not a time like 1:25 or 0125")),
    }
}
