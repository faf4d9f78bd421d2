use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use serde::Serialize;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use explorer_data::client::{ExplorerClient, HttpConfig};
use explorer_data::config::ExplorerConfig;
use explorer_data::domain::{Network, QueryResult};
use explorer_data::render::{Severity, present};

/// Query account data from a Move chain's node and indexer
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Network to query (mainnet, testnet, devnet, local)
    #[arg(short, long, global = true)]
    network: Option<Network>,

    /// Indexer base URL or GraphQL endpoint for the selected network
    #[arg(long, global = true)]
    indexer_url: Option<String>,

    /// Node REST base URL for the selected network
    #[arg(long, global = true)]
    node_url: Option<String>,

    /// API key sent as a bearer token to the indexer
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one resource of an account
    Resource { address: String, resource_type: String },
    /// List all resources of an account
    Resources { address: String },
    /// Fetch one module of an account
    Module { address: String, name: String },
    /// List all modules of an account
    Modules { address: String },
    /// List the packages published by an account
    Packages { address: String },
    /// Count the transactions of an account
    TxCount { address: String },
    /// List transaction versions of an account, newest first
    TxVersions {
        address: String,
        #[arg(short, long, default_value_t = 25)]
        limit: u32,
        #[arg(short, long)]
        offset: Option<u32>,
    },
    /// Read a coin balance through the node
    Balance {
        address: String,
        /// Coin type, defaults to the native coin
        #[arg(long)]
        coin_type: Option<String>,
    },
}

impl Commands {
    fn subject(&self) -> String {
        match self {
            Self::Resource {
                address,
                resource_type,
            } => format!("resource {resource_type} of account {address}"),
            Self::Resources { address } => format!("resources of account {address}"),
            Self::Module { address, name } => format!("module {name} of account {address}"),
            Self::Modules { address } => format!("modules of account {address}"),
            Self::Packages { address } => format!("packages of account {address}"),
            Self::TxCount { address } | Self::TxVersions { address, .. } => {
                format!("transactions of account {address}")
            }
            Self::Balance { address, .. } => format!("balance of account {address}"),
        }
    }
}

fn build_config(cli: &Cli) -> ExplorerConfig {
    let mut config = ExplorerConfig::from_env();

    if let Some(network) = cli.network {
        config.network = network;
    }
    let network = config.network;

    if let Some(url) = &cli.indexer_url {
        config.indexer = config.indexer.with_override(network, url.clone());
    }
    if let Some(url) = &cli.node_url {
        config.node_overrides.insert(network, url.clone());
    }
    if let Some(key) = &cli.api_key {
        config.api_keys.insert(network, key.clone());
    }
    if let Some(secs) = cli.timeout_secs {
        config.http = HttpConfig::with_timeout(Duration::from_secs(secs));
    }

    config
}

fn emit<T: Serialize>(result: QueryResult<T>, subject: &str) -> Result<ExitCode> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!("{subject} failed: {error}");
            let presentation = present(&error, Some(subject));
            let label = match presentation.severity {
                Severity::Info => "info",
                Severity::Error => "error",
            };
            eprintln!("{label}: {}", presentation.text);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = build_config(&cli);
    let client = ExplorerClient::from_config(&config)?;
    let subject = cli.command.subject();

    tracing::debug!(network = %config.network, "Querying {subject}");

    match cli.command {
        Commands::Resource {
            address,
            resource_type,
        } => emit(
            client.account_resource(&address, &resource_type).await,
            &subject,
        ),
        Commands::Resources { address } => emit(client.account_resources(&address).await, &subject),
        Commands::Module { address, name } => {
            emit(client.account_module(&address, &name).await, &subject)
        }
        Commands::Modules { address } => emit(client.account_modules(&address).await, &subject),
        Commands::Packages { address } => emit(client.account_packages(&address).await, &subject),
        Commands::TxCount { address } => {
            emit(client.account_transaction_count(&address).await, &subject)
        }
        Commands::TxVersions {
            address,
            limit,
            offset,
        } => emit(
            client
                .account_transaction_versions(&address, limit, offset)
                .await,
            &subject,
        ),
        Commands::Balance { address, coin_type } => emit(
            client.account_balance(&address, coin_type.as_deref()).await,
            &subject,
        ),
    }
}

/// Application entry point
#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse()).await
}
