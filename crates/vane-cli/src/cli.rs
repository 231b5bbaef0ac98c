use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vane",
    about = "Lamport-clocked record aggregation service",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the aggregation server
    Serve(ServeArgs),
    /// Publish a feed file's record to an aggregator
    Publish(PublishArgs),
    /// Fetch and print the aggregator's current record
    Fetch(FetchArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:4567")]
    pub bind: SocketAddr,

    /// Seconds a record may go unrefreshed before a read evicts it
    #[arg(long, default_value = "30")]
    pub staleness_secs: u64,

    /// Persist the record to this file instead of holding it in memory
    #[arg(long)]
    pub data_path: Option<PathBuf>,
}

#[derive(Args)]
pub struct PublishArgs {
    /// Aggregator base URL, e.g. http://127.0.0.1:4567
    pub server_url: String,
    /// Feed file with one key:value entry per line
    pub feed: PathBuf,
}

#[derive(Args)]
pub struct FetchArgs {
    /// Aggregator base URL, e.g. http://127.0.0.1:4567
    pub server_url: String,
}
