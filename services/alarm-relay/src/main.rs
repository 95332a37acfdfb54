//! Alarm Relay CLI
//!
//! Reads one SNS event and relays the CloudWatch alarm it carries to Slack.

use std::path::PathBuf;
use std::process::ExitCode;

use alarm_relay::event::read_event;
use alarm_relay::{load_config, Config, Outcome};
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(name = "alarm-relay")]
#[command(about = "Relays CloudWatch alarm notifications from SNS to a Slack webhook")]
#[command(version)]
struct Args {
    /// Path to the SNS event JSON (reads stdin when omitted)
    #[arg(short, long)]
    event: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the formatted message instead of posting it
    #[arg(long)]
    dry_run: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Parsed command line arguments: event={:?}, config={:?}, dry_run={}",
        args.event,
        args.config,
        args.dry_run
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        Config::default()
    };
    config.resolve_secrets()?;

    let raw = read_event(args.event.as_deref())?;

    if args.dry_run {
        println!("{}", alarm_relay::preview(&config, &raw)?);
        return Ok(ExitCode::SUCCESS);
    }

    match alarm_relay::run(&config, &raw).await? {
        Outcome::Delivered => Ok(ExitCode::SUCCESS),
        Outcome::Rejected { status } => {
            tracing::warn!("Delivery rejected with status {}", status);
            Ok(ExitCode::FAILURE)
        }
    }
}
