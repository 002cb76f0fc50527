use std::process::ExitCode;

use anyhow::Context as _;
use axum::http::StatusCode;
use clap::Parser as _;

use personbio::cli::{Cli, Command, LookupArgs};
use personbio::config::{ServeConfig, UpstreamConfig};
use personbio::lookup::{self, LookupRequest};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    personbio::logging::init(personbio::logging::DEFAULT_FILTER).context("init logging")?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        Command::Serve(args) => {
            let config = ServeConfig::resolve(&args).context("resolve serve config")?;
            personbio::server::serve(config).await.context("serve")?;
        }
        Command::Lookup(args) => {
            run_lookup(args).await.context("lookup")?;
        }
    }

    Ok(())
}

async fn run_lookup(args: LookupArgs) -> anyhow::Result<()> {
    let client = UpstreamConfig::resolve(&args.upstream).client()?;
    let request = LookupRequest::new(args.name, !args.raw);

    let response = lookup::resolve(&client, &request).await;
    if response.status != StatusCode::OK {
        anyhow::bail!("{} ({})", response.body_text(), response.status);
    }

    println!("{}", response.body_text());
    Ok(())
}
