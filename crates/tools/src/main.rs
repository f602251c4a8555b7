use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::Path;

use deploy_config::network::{LOCAL_HOST, LOCAL_PORT, PROFILES};
use deploy_config::selection::{select_network, DEPLOY_TOML, NETWORK_VAR};
use deploy_config::{logging, resolve, Secrets};

#[derive(Parser)]
#[command(name = "deploy-config")]
#[command(about = "Resolve network and compiler configuration for contract deployment")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported networks
    Networks,
    /// Resolve and print the configuration for a network
    Config {
        /// Network to resolve (development/ropsten/kovan/rinkeby/goerli/main)
        #[arg(short, long)]
        network: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Networks => {
            println!(
                "{:<12} {:<10} {:<22} {:>10} {:>16}",
                "NETWORK", "ID", "GATEWAY", "GAS", "GAS PRICE"
            );
            for profile in PROFILES.iter() {
                let gateway = if profile.network.is_local() {
                    format!("{}:{}", LOCAL_HOST, LOCAL_PORT)
                } else {
                    profile.gateway_host.unwrap_or_default().to_string()
                };
                println!(
                    "{:<12} {:<10} {:<22} {:>10} {:>16}",
                    profile.network.as_str(),
                    profile.network_id.to_string(),
                    gateway,
                    profile.gas,
                    profile.gas_price
                );
            }
            Ok(())
        }
        Commands::Config { network, json } => {
            // .env is optional
            let _ = dotenvy::dotenv();

            let secrets = Secrets::from_env();
            let env_network = std::env::var(NETWORK_VAR).ok();

            let selection = select_network(
                network.as_deref(),
                env_network.as_deref(),
                Path::new(DEPLOY_TOML),
            )
            .context("failed to select network")?;

            let config = resolve(selection.network, &secrets)
                .with_context(|| format!("failed to resolve network {}", selection.network))?;

            if json {
                println!("{}", config.to_json()?);
            } else {
                config.print_summary();
            }
            Ok(())
        }
    }
}
