//! Deployment configuration tools
//!
//! Resolves the network, signing, and compiler configuration a smart
//! contract toolchain needs at startup.

pub mod config;
pub mod logging;
pub mod network;
pub mod provider;
pub mod secrets;
pub mod selection;

pub use config::{resolve, ConfigError, Endpoint, ResolvedConfig};
pub use network::{Network, NetworkId, NetworkProfile};
pub use provider::{LazyProvider, SigningProviderFactory};
pub use secrets::{Mnemonic, Secrets};
