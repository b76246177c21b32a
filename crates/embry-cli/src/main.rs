#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

use std::io::Read;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use embry_engine::EngineConfig;
use embry_engine::mock::{MockConfig, MockEngine};
use embry_worker::{JobHandler, ServiceHandle};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "embry_cli::startup";
pub const TRACING_TARGET_JOB: &str = "embry_cli::job";

/// Runs one job through the embry dispatch pipeline.
#[derive(Debug, Parser)]
#[command(name = "embry", version, about)]
struct Cli {
    /// Path to a JSON job description; reads stdin when omitted.
    #[arg(long = "job-file")]
    job_file: Option<PathBuf>,

    /// Engine configuration.
    #[command(flatten)]
    engine: EngineConfig,
}

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_JOB,
            error = %error,
            "job terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let engine_config = cli.engine.clone();
    let handler = JobHandler::new(ServiceHandle::new(move || {
        let config = engine_config.clone();
        async move { Ok(MockEngine::new(config, MockConfig::default())) }
    }));

    let ceiling = handler
        .concurrency_limit()
        .await
        .context("failed to initialize engine")?;
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        max_concurrency = ceiling,
        models = ?cli.engine.model_names,
        "engine ready"
    );

    let job = read_job(cli.job_file.as_deref()).context("failed to read job description")?;

    match handler.run(job).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(error) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&JobHandler::error_payload(&error))?
            );
            Err(error.into())
        }
    }
}

fn read_job(path: Option<&std::path::Path>) -> anyhow::Result<serde_json::Value> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("cannot read stdin")?;
            buffer
        }
    };

    serde_json::from_str(&raw).context("job description is not valid JSON")
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
