//! `daygrid` CLI — lay out calendar events from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Day-grid columns for a 320-wide viewport (stdin → stdout)
//! cat events.json | daygrid day --width 320
//!
//! # Only the segments drawn on one date, with a left gutter for hour labels
//! daygrid day -i events.json --width 400 --left-margin 48 --date 2026-03-03
//!
//! # Month grouping (days → overlap chains)
//! daygrid month -i events.json -o month.json
//!
//! # Just split multi-day events into single-day segments
//! daygrid split -i events.json --compact
//!
//! # Keep malformed events as zero-height blocks instead of rejecting them
//! daygrid day --width 320 --policy zero-duration -i events.json
//! ```
//!
//! Input is a JSON array of `{id, start, end, title?, summary, color?}`.
//! Set `RUST_LOG` (or pass `-v`) to see engine diagnostics on stderr.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use daygrid::{Event, IntervalPolicy, LayoutConfig};
use serde::Serialize;
use std::io::{self, Read};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "daygrid", version, about = "Calendar event layout CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine diagnostics at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out events as day-grid columns
    Day {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Viewport width the columns are fitted into
        #[arg(long, allow_negative_numbers = true)]
        width: f64,
        /// Only lay out segments drawn on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Group events by day and overlap chain for a month grid
    Month {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Split multi-day events into single-day segments
    Split {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[derive(Args)]
struct LayoutArgs {
    /// JSON layout config file; flags below override its fields
    #[arg(long)]
    config: Option<String>,
    /// Height of the 24-hour track
    #[arg(long)]
    track_height: Option<f64>,
    /// Margin subtracted from every segment width
    #[arg(long)]
    gutter: Option<f64>,
    /// Width reserved left of the first column
    #[arg(long)]
    left_margin: Option<f64>,
    /// How to treat events whose start is not before their end
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Reject,
    ZeroDuration,
}

impl From<PolicyArg> for IntervalPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Reject => IntervalPolicy::Reject,
            PolicyArg::ZeroDuration => IntervalPolicy::ZeroDuration,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Day {
            io,
            layout,
            width,
            date,
        } => {
            let events = read_events(io.input.as_deref())?;
            let config = build_config(&layout)?;
            let day = match date {
                Some(date) => daygrid::layout_day_on(&events, date, width, &config),
                None => daygrid::layout_day(&events, width, &config),
            }
            .context("Failed to compute day layout")?;
            report_rejections(day.rejected.len());
            write_json(&io, &day)?;
        }
        Commands::Month { io, layout } => {
            let events = read_events(io.input.as_deref())?;
            let config = build_config(&layout)?;
            let month =
                daygrid::layout_month(&events, &config).context("Failed to compute month layout")?;
            report_rejections(month.rejected.len());
            write_json(&io, &month)?;
        }
        Commands::Split { io, layout } => {
            let events = read_events(io.input.as_deref())?;
            let config = build_config(&layout)?;
            let split =
                daygrid::layout_split(&events, &config).context("Failed to split events")?;
            report_rejections(split.rejected.len());
            write_json(&io, &split)?;
        }
    }

    Ok(())
}

/// Install a stderr fmt subscriber so stdout stays clean JSON.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("daygrid=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Build the layout config from `--config` and the override flags.
///
/// - No `--config` starts from `LayoutConfig::default()`
/// - Each flag that is present replaces the matching field
/// - The merged config is validated before use
fn build_config(args: &LayoutArgs) -> Result<LayoutConfig> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str::<LayoutConfig>(&raw)
                .with_context(|| format!("Failed to parse config file: {}", path))?
        }
        None => LayoutConfig::default(),
    };

    if let Some(track_height) = args.track_height {
        config = config.with_track_height(track_height);
    }
    if let Some(gutter) = args.gutter {
        config = config.with_gutter(gutter);
    }
    if let Some(left_margin) = args.left_margin {
        config = config.with_left_margin(left_margin);
    }
    if let Some(policy) = args.policy {
        config = config.with_interval_policy(policy.into());
    }

    config.validate().context("Invalid layout config")?;
    Ok(config)
}

fn report_rejections(count: usize) {
    if count > 0 {
        tracing::debug!(count, "events rejected for start >= end");
    }
}

fn read_events(path: Option<&str>) -> Result<Vec<Event>> {
    let raw = read_input(path)?;
    Event::list_from_json(&raw).context("Failed to parse events JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(io_args: &IoArgs, value: &T) -> Result<()> {
    let content = if io_args.compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    write_output(io_args.output.as_deref(), &content)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
