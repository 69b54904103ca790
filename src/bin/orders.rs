//! CLI inspector for the exchange contract's public order table.
//!
//! Connection details come from environment variables (or a `.env` file),
//! filters come from CLI arguments.

use std::process::exit;

use clap::Parser;
use obex_sdk::{
    Network,
    client::{Client, OrderFilter},
};
use tracing::error;

/// Environment configuration (node endpoint, contract account).
#[derive(Debug, serde::Deserialize)]
struct EnvConfig {
    /// Node protocol, `http` or `https` (default: https)
    node_protocol: Option<String>,

    /// Node host name
    node_host: String,

    /// Node port (default: protocol default)
    node_port: Option<u16>,

    /// Account the exchange contract is deployed under
    exchange_account: String,
}

/// Filters and pagination for the order listing.
#[derive(Debug, Parser)]
#[command(name = "orders")]
#[command(about = "List open orders on the exchange contract")]
struct Cli {
    /// Keep only orders owned by this user account
    #[arg(long)]
    user: Option<String>,

    /// Keep only orders relayed by this sender account
    #[arg(long)]
    sender: Option<String>,

    /// Keep only orders offering this currency
    #[arg(long)]
    base_symbol: Option<String>,

    /// Keep only orders asking for this currency
    #[arg(long)]
    counter_symbol: Option<String>,

    /// Page to show, 1-based (requires --limit)
    #[arg(long)]
    page: Option<usize>,

    /// Rows per page
    #[arg(long)]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    let env_config: EnvConfig = match envy::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let network = Network::new(
        env_config.node_protocol.as_deref().unwrap_or("https"),
        env_config.node_host,
        env_config.node_port,
    );
    let client = Client::new(network, env_config.exchange_account);

    let filter = OrderFilter {
        user: cli.user,
        sender: cli.sender,
        base_symbol: cli.base_symbol,
        counter_symbol: cli.counter_symbol,
        page: cli.page,
        limit: cli.limit,
    };

    let page = match client.get_orders(&filter).await {
        Ok(page) => page,
        Err(e) => {
            error!("Failed to query order table: {}", e);
            exit(1);
        }
    };

    match serde_json::to_string_pretty(&page) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            error!("Failed to render order page: {}", e);
            exit(1);
        }
    }
}
