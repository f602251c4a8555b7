//! Deployment configuration resolution
//!
//! Turns a selected [`Network`] plus the startup [`Secrets`] into one
//! immutable [`ResolvedConfig`]: how to reach the network, how to sign on
//! it, how to compile, and where compiled artifacts go.
//!
//! Resolution is a pure function. It performs no I/O and never reads the
//! process environment; callers gather secrets once at the entry point.
//!
//! # Examples
//!
//! ```rust
//! use deploy_config::config::resolve;
//! use deploy_config::{Network, Secrets};
//!
//! let config = resolve(Network::Development, &Secrets::default()).unwrap();
//! assert_eq!(config.gas, 8_000_000);
//! ```

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::network::{gateway_url, Network, NetworkId, LOCAL_HOST, LOCAL_PORT};
use crate::provider::{LazyProvider, SigningProviderFactory};
use crate::secrets::{Mnemonic, Secrets, API_KEY_VAR, MNEMONIC_VAR};

/// Directory compiled contract artifacts are written to.
pub const CONTRACTS_BUILD_DIRECTORY: &str = "./client/src/contracts-build";

/// Toolchain plugins enabled for every network.
pub const PLUGINS: &[&str] = &["truffle-security"];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing credential: {0} must be set for remote networks")]
    MissingCredential(&'static str),

    #[error(
        "Unknown network: {0}. Must be: development, ropsten, kovan, rinkeby, goerli, or main"
    )]
    UnknownNetwork(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Solidity optimizer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Optimizer {
    pub enabled: bool,
    /// Expected number of executions per deployed opcode
    pub runs: u32,
}

/// Compiler settings, identical across networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompilerSettings {
    pub compiler: &'static str,
    pub version: &'static str,
    pub optimizer: Optimizer,
}

impl CompilerSettings {
    pub const SOLC: CompilerSettings = CompilerSettings {
        compiler: "solc",
        version: "0.5.11",
        optimizer: Optimizer {
            enabled: true,
            runs: 1000,
        },
    };
}

/// How the resolved network is reached
#[derive(Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Local node; transactions are signed by the node's unlocked accounts
    Local { host: &'static str, port: u16 },
    /// Remote gateway; transactions are signed with a provider derived from
    /// the mnemonic
    Remote {
        host: &'static str,
        url: String,
        mnemonic: Mnemonic,
    },
}

impl Endpoint {
    /// Endpoint as a URL string, including the API key for remote gateways.
    pub fn url(&self) -> String {
        match self {
            Endpoint::Local { host, port } => format!("http://{}:{}", host, port),
            Endpoint::Remote { url, .. } => url.clone(),
        }
    }

    /// Endpoint URL safe for display. The API key is replaced as a whole,
    /// whatever characters it contains.
    pub fn display_url(&self) -> String {
        match self {
            Endpoint::Local { .. } => self.url(),
            Endpoint::Remote { host, .. } => gateway_url(host, "****"),
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Local { host, port } => f
                .debug_struct("Local")
                .field("host", host)
                .field("port", port)
                .finish(),
            Endpoint::Remote { mnemonic, .. } => f
                .debug_struct("Remote")
                .field("url", &self.display_url())
                .field("mnemonic", mnemonic)
                .finish(),
        }
    }
}

/// Resolved runtime configuration for one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub network: Network,
    pub network_id: NetworkId,
    pub endpoint: Endpoint,
    /// Gas limit per transaction
    pub gas: u64,
    /// Gas price in wei
    pub gas_price: u64,
    pub compiler: CompilerSettings,
    pub contracts_build_directory: &'static str,
    pub plugins: Vec<&'static str>,
}

/// Resolve the configuration for `network`.
///
/// # Errors
///
/// Returns `ConfigError::MissingCredential` for a remote network when the
/// mnemonic or the API key is absent. The mnemonic is checked first.
pub fn resolve(network: Network, secrets: &Secrets) -> Result<ResolvedConfig, ConfigError> {
    let profile = network.profile();

    let endpoint = match profile.gateway_host {
        None => Endpoint::Local {
            host: LOCAL_HOST,
            port: LOCAL_PORT,
        },
        Some(host) => {
            let mnemonic = secrets
                .mnemonic()
                .ok_or(ConfigError::MissingCredential(MNEMONIC_VAR))?;
            let api_key = secrets
                .api_key()
                .ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;

            Endpoint::Remote {
                host,
                url: gateway_url(host, api_key),
                mnemonic: mnemonic.clone(),
            }
        }
    };

    let config = ResolvedConfig {
        network,
        network_id: profile.network_id,
        endpoint,
        gas: profile.gas,
        gas_price: profile.gas_price,
        compiler: CompilerSettings::SOLC,
        contracts_build_directory: CONTRACTS_BUILD_DIRECTORY,
        plugins: PLUGINS.to_vec(),
    };

    tracing::info!(
        network = %config.network,
        network_id = %config.network_id,
        endpoint = %config.endpoint.display_url(),
        gas = config.gas,
        "Resolved deployment configuration"
    );

    Ok(config)
}

impl ResolvedConfig {
    /// Provider handle for signing transactions on this network.
    ///
    /// Nothing is constructed until [`LazyProvider::get`] is called.
    pub fn signing_provider<'a, F>(&'a self, factory: &'a F) -> LazyProvider<'a, F>
    where
        F: SigningProviderFactory,
    {
        match &self.endpoint {
            Endpoint::Local { .. } => LazyProvider::local(factory),
            Endpoint::Remote { url, mnemonic, .. } => LazyProvider::remote(factory, mnemonic, url),
        }
    }

    /// Print the resolved configuration
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════════╗");
        println!("║         DEPLOYMENT NETWORK CONFIGURATION RESOLVED              ║");
        println!("╚════════════════════════════════════════════════════════════════╝");
        println!("  Network:             {}", self.network);
        println!("  Network ID:          {}", self.network_id);
        println!("  Endpoint:            {}", self.endpoint.display_url());

        match &self.endpoint {
            Endpoint::Local { .. } => println!("  Signer:              node accounts"),
            Endpoint::Remote { mnemonic, .. } => println!(
                "  Signer:              HD wallet ({} word mnemonic)",
                mnemonic.word_count()
            ),
        }

        println!("  Gas Limit:           {}", self.gas);
        println!("  Gas Price:           {} wei", self.gas_price);
        println!(
            "  Compiler:            {} {}",
            self.compiler.compiler, self.compiler.version
        );

        if self.compiler.optimizer.enabled {
            println!(
                "  Optimizer:           enabled ({} runs)",
                self.compiler.optimizer.runs
            );
        } else {
            println!("  Optimizer:           disabled");
        }

        println!("  Build Directory:     {}", self.contracts_build_directory);
        println!("  Plugins:             {}", self.plugins.join(", "));
        println!("╚════════════════════════════════════════════════════════════════╝");
    }

    /// Get configuration as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// Manual Serialize impl so secrets never leave the process
impl Serialize for ResolvedConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("network", &self.network)?;
        map.serialize_entry("network_id", &self.network_id)?;

        match &self.endpoint {
            Endpoint::Local { host, port } => {
                map.serialize_entry("host", host)?;
                map.serialize_entry("port", port)?;
            }
            Endpoint::Remote { .. } => {
                map.serialize_entry("url", &self.endpoint.display_url())?;
            }
        }

        map.serialize_entry("gas", &self.gas)?;
        map.serialize_entry("gas_price", &self.gas_price)?;
        map.serialize_entry("compiler", &self.compiler)?;
        map.serialize_entry("contracts_build_directory", &self.contracts_build_directory)?;
        map.serialize_entry("plugins", &self.plugins)?;
        map.end()
    }
}
