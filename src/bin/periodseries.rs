//! periodseries - inspect calendar periods from the command line

use anyhow::Context;
use clap::{Parser, Subcommand};
use periodseries::{CalendarContext, Granularity, RegularTimePeriod};

#[derive(Parser)]
#[command(name = "periodseries")]
#[command(about = "Parse, convert and step through calendar time periods", long_about = None)]
struct Cli {
    /// Path to a configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Calendar to evaluate periods in (UTC, +05:30, Europe/London); overrides the config
    #[arg(short, long, global = true)]
    zone: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a period and print its millisecond bounds
    Parse {
        /// Granularity of the period (year, quarter, month, week, day, ...)
        granularity: Granularity,
        /// Period text, e.g. "2024-03" or "Q2 2024"
        text: String,
    },

    /// Print the period containing an instant
    Containing {
        /// Granularity of the period
        granularity: Granularity,
        /// Milliseconds since the Unix epoch
        #[arg(allow_hyphen_values = true)]
        millis: i64,
    },

    /// Step forwards (or backwards) from a period
    Walk {
        /// Granularity of the period
        granularity: Granularity,
        /// Starting period text
        text: String,
        /// Number of steps; negative values walk backwards
        #[arg(default_value_t = 5, allow_hyphen_values = true)]
        count: i64,
    },
}

fn main() {
    if let Err(e) = run_application() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run_application() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = periodseries::init(cli.config.as_deref()).context("failed to initialise")?;
    let context: CalendarContext = match &cli.zone {
        Some(zone) => zone.parse()?,
        None => config.calendar.context()?,
    };

    match &cli.command {
        Commands::Parse { granularity, text } => {
            describe(RegularTimePeriod::parse(*granularity, text, context)?, cli.json)
        }
        Commands::Containing {
            granularity,
            millis,
        } => describe(
            RegularTimePeriod::containing(*granularity, *millis, context)?,
            cli.json,
        ),
        Commands::Walk {
            granularity,
            text,
            count,
        } => {
            let periods = walk(RegularTimePeriod::parse(*granularity, text, context)?, *count);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&periods)?);
            } else {
                for period in &periods {
                    println!("{}", bounds_line(period));
                }
            }
            Ok(())
        }
    }
}

/// Prints a period with its serial index and neighbours.
fn describe(period: RegularTimePeriod, json: bool) -> anyhow::Result<()> {
    let previous = period.previous();
    let next = period.next();
    if json {
        let value = serde_json::json!({
            "period": period,
            "serial_index": period.serial_index(),
            "previous": previous,
            "next": next,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", bounds_line(&period));
        println!("serial index\t{}", period.serial_index());
        println!("previous\t{}", neighbour(previous));
        println!("next\t{}", neighbour(next));
    }
    Ok(())
}

fn bounds_line(period: &RegularTimePeriod) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        period,
        period.first_millisecond(),
        period.middle_millisecond(),
        period.last_millisecond()
    )
}

fn neighbour(period: Option<RegularTimePeriod>) -> String {
    period.map_or_else(|| "-".to_string(), |p| p.to_string())
}

/// Collects `start` and up to `count.abs()` neighbours, stopping at the edge of
/// the supported range.
fn walk(start: RegularTimePeriod, count: i64) -> Vec<RegularTimePeriod> {
    let mut periods = vec![start];
    let mut current = start;
    for _ in 0..count.unsigned_abs() {
        let step = if count < 0 {
            current.previous()
        } else {
            current.next()
        };
        match step {
            Some(period) => {
                periods.push(period);
                current = period;
            }
            None => {
                log::warn!("reached the end of the supported range after {}", current);
                break;
            }
        }
    }
    periods
}
