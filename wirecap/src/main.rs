#![forbid(unsafe_code)]

mod inspect;
mod standalone;

use clap::{Parser, Subcommand};
use http::Method;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};
use wirecap_lib::config::load_from_path;
use wirecap_lib::telemetry::{init_metrics, init_tracing};
use wirecap_lib::{
    CaptureClient, CaptureError, Config, DirectorySink, HeaderFields, InterceptedRequest, OnError,
    Recorder,
};

use crate::standalone::StandaloneInterception;

type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(author, version, about = "Record HTTP(S) exchanges as replayable wire records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch URLs through the capture pipeline and write one record per exchange
    Record {
        /// Path to configuration TOML file
        #[arg(short, long, value_name = "FILE", default_value = "wirecap.toml")]
        config: PathBuf,
        /// Absolute http(s) URLs to fetch with GET
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Print a summary of recorded exchanges
    Inspect {
        /// One JSON object per record
        #[arg(long)]
        json: bool,
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Record { config, urls } => {
            let cfg = match load_from_path(&config) {
                Ok(cfg) => cfg,
                Err(err) => {
                    setup_tracing("info", false);
                    error!(%err, path = %config.display(), "failed to load configuration");
                    std::process::exit(1);
                }
            };
            setup_tracing(&cfg.logging.level, cfg.logging.show_target);
            info!(output_dir = %cfg.output_dir.display(), urls = urls.len(), "configuration loaded");

            if let Err(err) = record(cfg, urls).await {
                error!(%err, "recording failed");
                std::process::exit(1);
            }
        }
        Command::Inspect { json, files } => {
            setup_tracing("warn", false);
            if let Err(err) = inspect::inspect(&files, json) {
                error!(%err, "failed to inspect records");
                std::process::exit(1);
            }
        }
    }
}

fn setup_tracing(level: &str, show_target: bool) {
    if let Err(err) = init_tracing(level, show_target) {
        eprintln!("failed to initialize logging: {err}");
    }
}

async fn record(cfg: Config, urls: Vec<String>) -> CliResult<()> {
    let client = CaptureClient::new(&cfg.transport)?;
    let sink = DirectorySink::create(&cfg.output_dir).await?;
    info!(dir = %sink.dir().display(), "writing records");
    let headers = browser_headers(&cfg.user_agent)?;

    let on_error: OnError = Arc::new(|request: &InterceptedRequest, err: &CaptureError| {
        error!(url = %request.url, %err, error_type = err.error_type(), "capture failed");
    });
    let recorder = Recorder::new(client, sink, cfg.user_agent.as_str())
        .with_metrics(init_metrics())
        .with_on_error(on_error);

    let (tx, rx) = mpsc::channel(urls.len().max(1));
    let handle = recorder.start(rx);

    for url in urls {
        let request = InterceptedRequest::new(Method::GET, url)
            .with_headers(headers.clone());
        if tx.send(StandaloneInterception::new(request)).await.is_err() {
            break;
        }
    }
    drop(tx);

    handle.join().await;
    Ok(())
}

/// Headers a browser would send for a top-level navigation
fn browser_headers(user_agent: &str) -> CliResult<HeaderFields> {
    let mut headers = HeaderFields::new();
    headers.append_str("accept", "text/html,application/xhtml+xml,*/*;q=0.8")?;
    headers.append_str("accept-encoding", "gzip, deflate, br")?;
    headers.append_str("user-agent", user_agent)?;
    Ok(headers)
}
