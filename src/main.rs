mod archive;
mod error;
mod extract;
mod output;
mod report;
mod settings;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::extract::accessor::FieldPath;
use crate::extract::ExtractionSummary;
use crate::report::TracingReporter;
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "tweet_extractor",
    about = "Extract tweet texts from a Twitter archive, skipping retweets and tweets with links"
)]
struct Cli {
    /// Input tweets.js file path [default: tweets.js]
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output text file path [default: tweets_text_only.txt]
    #[arg(long)]
    output: Option<PathBuf>,

    /// Maximum number of tweets to extract (default: all)
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    max_tweets: Option<usize>,

    /// Execution log file, overwritten each run [default: tweet_extraction.log]
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Dotted path of the text field inside each record [default: tweet.full_text]
    #[arg(long)]
    text_field: Option<String>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Log every skipped record
    #[arg(short, long)]
    verbose: bool,
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load().context("Failed to load settings from environment")?;
    if let Some(input) = &cli.input {
        settings.input = input.clone();
    }
    if let Some(output) = &cli.output {
        settings.output = output.clone();
    }
    if let Some(log_file) = &cli.log_file {
        settings.log_file = log_file.clone();
    }
    if let Some(field) = &cli.text_field {
        settings.text_field = field.clone();
    }
    if cli.max_tweets.is_some() {
        settings.max_tweets = cli.max_tweets;
    }
    Ok(settings)
}

/// Console plus a log file truncated on each run.
fn init_logging(log_file: &Path, verbose: bool) -> Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install log subscriber")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;
    init_logging(&settings.log_file, cli.verbose)?;

    info!("Starting tweet extraction script");
    info!(settings = ?settings, "Settings loaded");

    match run(&settings, !cli.no_progress) {
        Ok(()) => {
            info!(
                "Script completed successfully. Log file: {}",
                settings.log_file.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("Script failed with error");
            error!("{:#}", e);
            Err(e)
        }
    }
}

fn run(settings: &Settings, show_progress: bool) -> Result<()> {
    let t0 = Instant::now();
    info!(
        "Starting tweet extraction process from {}",
        settings.input.display()
    );
    if let Some(max) = settings.max_tweets {
        info!("Will extract up to {} tweets", max);
    }

    let blob = archive::read(&settings.input)?;
    let accessor = FieldPath::parse(&settings.text_field);
    let mut reporter = TracingReporter::new(show_progress);
    let extraction = extract::extract_blob(&blob, &accessor, settings.max_tweets, &mut reporter)
        .with_context(|| format!("Failed to extract tweets from {}", settings.input.display()))?;

    output::write_lines(&settings.output, &extraction.texts)?;

    log_summary(&extraction.summary, &settings.output);
    info!("Done in {}", format_duration(t0.elapsed()));
    Ok(())
}

fn log_summary(summary: &ExtractionSummary, output: &Path) {
    info!("=== Extraction Summary ===");
    info!("Records in archive: {}", summary.records);
    info!("Total tweets processed: {}", summary.total);
    info!("Valid tweets extracted: {}", summary.accepted);
    info!("Skipped tweets (empty/malformed): {}", summary.malformed);
    info!("Skipped tweets (containing links): {}", summary.links);
    info!("Skipped tweets (retweets): {}", summary.retweets);
    if summary.limit_reached {
        info!("Stopped early at the tweet limit");
    }
    info!("Output file: {}", output.display());
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
