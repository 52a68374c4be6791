use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use kubepeek_k8s::ClusterClient;

mod cli;
mod commands;
mod config;
mod output;

use cli::Args;
use config::{FileConfig, Settings};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so they never mix with command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let file = FileConfig::load(args.config.as_deref())?;
    let settings = Settings::resolve(&args, file);

    let client = ClusterClient::connect(settings.config_source())
        .await
        .context("Failed to create cluster client")?;
    tracing::debug!(source = %client.source(), "connected");

    let mut stdout = std::io::stdout();
    commands::execute(&client, args.command(), &settings, &mut stdout).await
}
