use anyhow::Context;
use clap::Parser;
use logsift_core::config::Config;
use logsift_feeds::FileSource;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "logsift",
    about = "Extract security-log search hits into a priority-ordered CSV"
)]
struct Cli {
    /// Search-response JSON or NDJSON file to read hits from.
    #[arg(long, short)]
    input: PathBuf,

    /// Output CSV path (overrides `output.path`).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Extra TOML config file layered over the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Blocking extraction workers (overrides `run.workers`).
    #[arg(long)]
    workers: Option<usize>,

    /// Clean cell values (strip brackets, blank out placeholders).
    #[arg(long)]
    clean: bool,

    /// Log at debug level.
    #[arg(long)]
    debug: bool,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(debug: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.log_file.as_deref())?;

    let started = chrono::Local::now();
    tracing::info!(%started, "logsift started");

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    if let Some(workers) = cli.workers {
        config.run.workers = workers;
    }
    if cli.clean {
        config.output.clean_values = true;
    }

    let source = FileSource::new(&cli.input);
    let summary = match logsift::run(&source, &config).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!(error = %e, "run aborted");
            return Err(e.into());
        }
    };

    let finished = chrono::Local::now();
    tracing::info!(
        %finished,
        elapsed_ms = (finished - started).num_milliseconds(),
        hits = summary.hits,
        columns = summary.columns,
        "logsift completed"
    );
    let output = summary.output.canonicalize().unwrap_or(summary.output);
    tracing::info!(output = %output.display(), "output saved");
    Ok(())
}
