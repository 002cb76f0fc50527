use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve `GET /person` over HTTP.
    Serve(ServeArgs),
    /// Resolve one name and print the response body.
    Lookup(LookupArgs),
}

#[derive(Debug, Args)]
pub struct UpstreamArgs {
    /// Encyclopedia query API endpoint (env: PERSONBIO_UPSTREAM_URL).
    #[arg(long)]
    pub upstream_url: Option<String>,

    /// Outbound request timeout in seconds (env: PERSONBIO_TIMEOUT_SECS).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Bind address (env: PERSONBIO_ADDR, default 127.0.0.1:8080).
    #[arg(long)]
    pub addr: Option<SocketAddr>,

    #[command(flatten)]
    pub upstream: UpstreamArgs,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Person's name, e.g. `marie_curie` or `Marie Curie`.
    #[arg(long)]
    pub name: String,

    /// Send the name upstream as given, without capitalizing it.
    #[arg(long)]
    pub raw: bool,

    #[command(flatten)]
    pub upstream: UpstreamArgs,
}
