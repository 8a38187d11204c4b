//! tariff-lens - display windows, navigation and tariff rates from the command line

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tabled::Tabled;
use tariff_lens::rates::dto::load_rate_group;
use tariff_lens::types::OutputFormat;
use tariff_lens::utils::format::{
    format_local, print_banner, render, CsvRow, RateReport, RoundingReport, StyleReport,
    WindowReport,
};
use tariff_lens::{
    classify_trend, find_active_rate, parse_zone, round_to_nearest_even_hundredth,
    round_to_two_decimal_places, PresentationStyle, QueryFilter,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tariff-lens")]
#[command(author, version, about = "Display windows, navigation bounds and active tariff rates for energy usage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// IANA time zone for window boundaries (defaults to the system zone)
    #[arg(long, global = true, env = "TARIFF_LENS_TZ")]
    tz: Option<String>,

    /// Instant treated as "now" for navigation bounds (RFC 3339)
    #[arg(long, global = true, value_parser = parse_instant)]
    now: Option<DateTime<Utc>>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the display window containing an instant
    Window {
        #[arg(short, long, value_enum)]
        style: PresentationStyle,
        /// Point of reference (RFC 3339), defaults to now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },
    /// Step one window back, bounded by the account start
    Back {
        #[arg(short, long, value_enum)]
        style: PresentationStyle,
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
        /// Earliest instant the account has data for (RFC 3339)
        #[arg(long, value_parser = parse_instant)]
        account_start: Option<DateTime<Utc>>,
    },
    /// Step one window forward, bounded by now
    Forward {
        #[arg(short, long, value_enum)]
        style: PresentationStyle,
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },
    /// Find the active rate and its trend in tariff API rate listings
    Rate {
        /// Rate listing files; each is one group, earlier files take priority
        #[arg(short, long = "rates", required = true, num_args = 1..)]
        rates: Vec<PathBuf>,
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },
    /// Round a value the billing way and the display way
    Round {
        #[arg(allow_negative_numbers = true)]
        value: Decimal,
    },
    /// List presentation styles
    Styles,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.tz.as_deref() {
        Some(name) => {
            let zone = parse_zone(name).with_context(|| format!("Invalid --tz value: {}", name))?;
            run(&cli, zone)
        }
        None => run(&cli, Local),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "tariff_lens=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();
}

fn parse_instant(s: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

fn run<Z>(cli: &Cli, zone: Z) -> Result<()>
where
    Z: TimeZone,
    Z::Offset: fmt::Display,
{
    // Only show banner for table format
    if matches!(cli.format, OutputFormat::Table) {
        print_banner();
    }

    let now = cli.now.unwrap_or_else(Utc::now);

    match &cli.command {
        Commands::Window { style, at } => run_window(cli, *style, at.unwrap_or(now), now, zone),
        Commands::Back { style, at, account_start } => run_back(
            cli,
            *style,
            at.unwrap_or(now),
            account_start.unwrap_or(DateTime::<Utc>::MIN_UTC),
            zone,
        ),
        Commands::Forward { style, at } => run_forward(cli, *style, at.unwrap_or(now), now, zone),
        Commands::Rate { rates, at } => run_rate(cli, rates, at.unwrap_or(now), zone),
        Commands::Round { value } => run_round(cli, *value),
        Commands::Styles => run_styles(cli),
    }
}

fn run_window<Z>(cli: &Cli, style: PresentationStyle, at: DateTime<Utc>, now: DateTime<Utc>, zone: Z) -> Result<()>
where
    Z: TimeZone,
    Z::Offset: fmt::Display,
{
    let filter = QueryFilter::new(style, at, zone).context("Failed to compute display window")?;
    println!("{}", render(vec![WindowReport::from_filter(&filter)], cli.format));

    if cli.verbose && matches!(cli.format, OutputFormat::Table) {
        let forward = if filter.can_step_forward(now) { "yes".green() } else { "no".red() };
        println!("  {} {}", "Can step forward:".bold(), forward);
        println!("  {} {}", "API grouping:".bold(), style.data_grouping());
    }

    Ok(())
}

fn run_back<Z>(
    cli: &Cli,
    style: PresentationStyle,
    at: DateTime<Utc>,
    account_start: DateTime<Utc>,
    zone: Z,
) -> Result<()>
where
    Z: TimeZone,
    Z::Offset: fmt::Display,
{
    let filter = QueryFilter::new(style, at, zone).context("Failed to compute display window")?;

    match filter.step_backward(account_start) {
        Some(previous) => println!("{}", render(vec![WindowReport::from_filter(&previous)], cli.format)),
        None => print_unavailable::<WindowReport>(
            cli,
            &format!(
                "Cannot step back: the previous window starts before {}",
                format_local(account_start, filter.zone())
            ),
        ),
    }

    Ok(())
}

fn run_forward<Z>(cli: &Cli, style: PresentationStyle, at: DateTime<Utc>, now: DateTime<Utc>, zone: Z) -> Result<()>
where
    Z: TimeZone,
    Z::Offset: fmt::Display,
{
    let filter = QueryFilter::new(style, at, zone).context("Failed to compute display window")?;

    match filter.step_forward(now) {
        Some(next) => println!("{}", render(vec![WindowReport::from_filter(&next)], cli.format)),
        None => print_unavailable::<WindowReport>(
            cli,
            &format!(
                "Cannot step forward: the next window is after {}",
                format_local(now, filter.zone())
            ),
        ),
    }

    Ok(())
}

/// Tables get an explanation; JSON and CSV get an empty result
fn print_unavailable<T: Tabled + Serialize + CsvRow>(cli: &Cli, message: &str) {
    match cli.format {
        OutputFormat::Table => println!("{}", message.yellow()),
        _ => println!("{}", render(Vec::<T>::new(), cli.format)),
    }
}

fn run_rate<Z>(cli: &Cli, paths: &[PathBuf], at: DateTime<Utc>, zone: Z) -> Result<()>
where
    Z: TimeZone,
    Z::Offset: fmt::Display,
{
    let groups = paths
        .iter()
        .map(|path| {
            load_rate_group(path).with_context(|| format!("Failed to load rate file: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    if cli.verbose && matches!(cli.format, OutputFormat::Table) {
        println!("{}", "Rate Groups:".bold());
        for (group, path) in groups.iter().zip(paths) {
            println!("  {} {} ({} rates): {}", "•".cyan(), group.title, group.rates.len(), path.display().to_string().dimmed());
        }
        println!();
    }

    let Some(active) = find_active_rate(&groups, at) else {
        print_unavailable::<RateReport>(cli, &format!("No rate is active at {}", format_local(at, &zone)));
        return Ok(());
    };

    let trend = classify_trend(&groups, Some(active));
    println!("{}", render(vec![RateReport::new(active, trend, &zone)], cli.format));

    Ok(())
}

fn run_round(cli: &Cli, value: Decimal) -> Result<()> {
    let report = RoundingReport {
        value,
        nearest_even_hundredth: round_to_nearest_even_hundredth(value),
        two_decimal_places: round_to_two_decimal_places(value),
    };
    println!("{}", render(vec![report], cli.format));
    Ok(())
}

fn run_styles(cli: &Cli) -> Result<()> {
    let rows: Vec<StyleReport> = PresentationStyle::ALL.into_iter().map(StyleReport::new).collect();
    println!("{}", render(rows, cli.format));

    if matches!(cli.format, OutputFormat::Table) {
        println!("\n{}", "Usage:".bold());
        println!("  tariff-lens window -s seven-day-week              # This week");
        println!("  tariff-lens back -s thirty-day-month --at 2024-05-10T12:00:00Z");
        println!("  tariff-lens rate -r agile.json --tz Europe/London  # Active rate and trend");
        println!("  tariff-lens round 0.025                           # Billing rounding");
        println!();
    }

    Ok(())
}
