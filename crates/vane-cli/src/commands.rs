use std::time::Duration;

use colored::Colorize;

use vane_client::{load_feed, AggregatorClient, FetchOutcome};
use vane_server::{AggregationServer, ServerConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    match cli.command {
        Command::Serve(args) => rt.block_on(cmd_serve(args)),
        Command::Publish(args) => rt.block_on(cmd_publish(args)),
        Command::Fetch(args) => rt.block_on(cmd_fetch(args)),
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind,
        staleness: Duration::from_secs(args.staleness_secs),
        data_path: args.data_path,
    };
    AggregationServer::new(config).serve().await?;
    Ok(())
}

async fn cmd_publish(args: PublishArgs) -> anyhow::Result<()> {
    let fields = load_feed(&args.feed)?;
    let client = AggregatorClient::new(&args.server_url);
    let receipt = client.publish(&fields).await?;
    println!(
        "{} Published {} fields from {}",
        "✓".green().bold(),
        fields.len().to_string().bold(),
        args.feed.display()
    );
    println!("  Lamport clock: {}", receipt.clock.to_string().yellow());
    Ok(())
}

async fn cmd_fetch(args: FetchArgs) -> anyhow::Result<()> {
    let client = AggregatorClient::new(&args.server_url);
    match client.fetch().await? {
        FetchOutcome::Record { fields, clock } => {
            println!("{} Record received", "✓".green().bold());
            for (key, value) in &fields {
                println!("  {}: {}", key.cyan(), render(value));
            }
            println!("  Client Lamport clock: {}", clock.to_string().yellow());
        }
        FetchOutcome::Empty { clock } => {
            println!("No record available.");
            println!("  Client Lamport clock: {}", clock.to_string().yellow());
        }
    }
    Ok(())
}

fn render(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
