use std::time::Duration;

use clap::{Parser, Subcommand};
use client::{ClientError, HttpRecordClient, RecordClient};
use common::types::Record;
use common::utils::logging::init_logging_cli;
use dotenvy::dotenv;

/// Command-line client for the redirect store.
#[derive(Debug, Parser)]
#[command(name = "redirect-store-client", version)]
struct Args {
    /// Server endpoint; defaults to `client.endpoint` from the config file.
    #[arg(long, env = "REDIRECT_STORE_ENDPOINT")]
    endpoint: Option<String>,
    /// Per-request timeout in seconds; defaults to `client.timeout_secs`.
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the server is reachable.
    Status,
    /// List every record.
    Scan,
    /// Fetch one record.
    Get { name: String },
    /// Create or update a record.
    Put { name: String, to: String },
    /// Remove a record.
    Delete { name: String },
}

async fn send(c: &dyn RecordClient, command: Command) -> Result<serde_json::Value, ClientError> {
    let value = match command {
        Command::Status => {
            c.status().await?;
            serde_json::Value::Null
        }
        Command::Scan => serde_json::to_value(c.scan().await?)?,
        Command::Get { name } => serde_json::to_value(c.get(&name).await?)?,
        Command::Put { name, to } => serde_json::to_value(c.put(Record { name, to }).await?)?,
        Command::Delete { name } => {
            c.delete(&name).await?;
            serde_json::Value::Null
        }
    };
    Ok(value)
}

/// `kind: message` line printed on stderr for a failed command.
fn report(err: &ClientError) -> String {
    format!("{}: {err}", err.kind())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv().ok();
    init_logging_cli();
    let args = Args::parse();

    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };
    let endpoint = args.endpoint.unwrap_or(cfg.client.endpoint);
    let timeout = Duration::from_secs(args.timeout_secs.unwrap_or(cfg.client.timeout_secs));

    let c = match HttpRecordClient::new(endpoint, timeout) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", report(&e));
            return std::process::ExitCode::FAILURE;
        }
    };

    match send(&c, args.command).await {
        Ok(value) => {
            println!("{value}");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", report(&e));
            std::process::ExitCode::FAILURE
        }
    }
}
