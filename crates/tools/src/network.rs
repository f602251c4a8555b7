//! Supported deployment networks and their static profiles.
//!
//! Every network has exactly one row in [`PROFILES`]. Gas values are fixed
//! per network and are not user-configurable.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Host of the local development node.
pub const LOCAL_HOST: &str = "127.0.0.1";

/// Port of the local development node.
pub const LOCAL_PORT: u16 = 8545;

/// Gas price shared by every profile, in wei.
pub const DEFAULT_GAS_PRICE: u64 = 10_000_000_000;

/// Networks a deployment can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Local node, e.g. ganache on 127.0.0.1:8545
    Development,
    Ropsten,
    Kovan,
    Rinkeby,
    Goerli,
    /// Ethereum mainnet
    Main,
}

impl Network {
    /// All networks, in profile table order.
    pub const ALL: [Network; 6] = [
        Network::Development,
        Network::Ropsten,
        Network::Kovan,
        Network::Rinkeby,
        Network::Goerli,
        Network::Main,
    ];

    /// Get network as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Development => "development",
            Network::Ropsten => "ropsten",
            Network::Kovan => "kovan",
            Network::Rinkeby => "rinkeby",
            Network::Goerli => "goerli",
            Network::Main => "main",
        }
    }

    /// Static profile for this network
    pub fn profile(&self) -> &'static NetworkProfile {
        &PROFILES[*self as usize]
    }

    pub fn is_local(&self) -> bool {
        self.profile().gateway_host.is_none()
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" => Ok(Network::Development),
            "ropsten" => Ok(Network::Ropsten),
            "kovan" => Ok(Network::Kovan),
            "rinkeby" => Ok(Network::Rinkeby),
            "goerli" => Ok(Network::Goerli),
            "main" | "mainnet" => Ok(Network::Main),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Network identifier a node must report before transactions are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkId {
    /// Match whatever id the node reports (`*`)
    Any,
    Chain(u64),
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkId::Any => write!(f, "*"),
            NetworkId::Chain(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for NetworkId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            NetworkId::Any => serializer.serialize_str("*"),
            NetworkId::Chain(id) => serializer.serialize_u64(*id),
        }
    }
}

/// One row of the profile table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkProfile {
    pub network: Network,
    pub network_id: NetworkId,
    /// Gateway host; `None` for the local development node
    pub gateway_host: Option<&'static str>,
    /// Upper bound on gas per transaction
    pub gas: u64,
    /// Gas price in wei
    pub gas_price: u64,
}

impl NetworkProfile {
    /// Gateway endpoint for this profile with the given API key appended.
    ///
    /// Returns `None` for the local development profile.
    pub fn gateway_url(&self, api_key: &str) -> Option<String> {
        self.gateway_host.map(|host| gateway_url(host, api_key))
    }
}

/// Gateway endpoint URL: `https://{host}/v3/{api_key}`.
pub fn gateway_url(host: &str, api_key: &str) -> String {
    format!("https://{}/v3/{}", host, api_key)
}

/// Profile table, indexed by `Network as usize`.
pub static PROFILES: [NetworkProfile; 6] = [
    NetworkProfile {
        network: Network::Development,
        network_id: NetworkId::Any,
        gateway_host: None,
        gas: 8_000_000,
        gas_price: DEFAULT_GAS_PRICE,
    },
    NetworkProfile {
        network: Network::Ropsten,
        network_id: NetworkId::Chain(3),
        gateway_host: Some("ropsten.infura.io"),
        gas: 4_565_030,
        gas_price: DEFAULT_GAS_PRICE,
    },
    NetworkProfile {
        network: Network::Kovan,
        network_id: NetworkId::Chain(42),
        gateway_host: Some("kovan.infura.io"),
        gas: 4_465_030,
        gas_price: DEFAULT_GAS_PRICE,
    },
    NetworkProfile {
        network: Network::Rinkeby,
        network_id: NetworkId::Chain(4),
        gateway_host: Some("rinkeby.infura.io"),
        gas: 6_000_000,
        gas_price: DEFAULT_GAS_PRICE,
    },
    NetworkProfile {
        network: Network::Goerli,
        network_id: NetworkId::Chain(5),
        gateway_host: Some("goerli.infura.io"),
        gas: 6_000_000,
        gas_price: DEFAULT_GAS_PRICE,
    },
    NetworkProfile {
        network: Network::Main,
        network_id: NetworkId::Chain(1),
        gateway_host: Some("mainnet.infura.io"),
        gas: 3_000_000,
        gas_price: DEFAULT_GAS_PRICE,
    },
];
