//! lux - terminal client for the collection search server
//!
//! Prompts for Label, Classifier, Agent and Date, sends each query on a
//! fresh connection and prints the results as a fixed-width table.
//! End input (Ctrl+D) to quit.

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use lux_client::table::render_table;
use lux_client::{prompt, LuxClient};
use lux_common::SearchResponse;

/// Command-line arguments for lux
#[derive(Parser, Debug)]
#[command(name = "lux")]
#[command(about = "Terminal client for the YUAG collection search server")]
#[command(version)]
struct Args {
    /// the host on which the server is running
    host: String,

    /// the port at which the server is listening
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Diagnostics only; stdout is reserved for the table
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = LuxClient::new(args.host, args.port);
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    while let Some(request) = prompt::read_request(&mut input, &mut stdout).await? {
        match client.search(&request).await {
            Err(e) => eprintln!("Error connecting to server: {}", e),
            Ok(SearchResponse::Error(message)) => eprintln!("Server Error: {}", message),
            Ok(SearchResponse::Results(results)) => {
                for line in render_table(&results) {
                    writeln!(stdout, "{}", line)?;
                }
                stdout.flush()?;
            }
        }
    }

    Ok(())
}
