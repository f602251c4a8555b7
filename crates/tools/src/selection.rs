//! Network selection
//!
//! The target network is chosen in priority order:
//!
//! 1. `--network` on the command line
//! 2. `DEPLOY_NETWORK` environment variable
//! 3. `[default] network` in deploy.toml
//! 4. `development`

use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::config::ConfigError;
use crate::network::Network;

/// Environment variable selecting the network.
pub const NETWORK_VAR: &str = "DEPLOY_NETWORK";

/// Project file consulted when no network is given explicitly.
pub const DEPLOY_TOML: &str = "deploy.toml";

/// deploy.toml contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeployToml {
    #[serde(default)]
    pub default: Option<DefaultSection>,
}

/// `[default]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultSection {
    pub network: Option<String>,
}

/// Where the selected network name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Flag,
    Env,
    File,
    Default,
}

impl fmt::Display for SelectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SelectionSource::Flag => "--network",
            SelectionSource::Env => NETWORK_VAR,
            SelectionSource::File => DEPLOY_TOML,
            SelectionSource::Default => "default",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub network: Network,
    pub source: SelectionSource,
}

/// Select the target network.
///
/// `toml_path` is only read when neither `flag` nor `env` names a network.
/// An empty `env` counts as unset, but an empty `flag` is rejected as an
/// unknown network. A missing file is not an error; an unreadable or
/// malformed one is.
pub fn select_network(
    flag: Option<&str>,
    env: Option<&str>,
    toml_path: &Path,
) -> Result<Selection, ConfigError> {
    // An explicit flag is always honoured, even when empty
    if let Some(name) = flag {
        return finish(name, SelectionSource::Flag);
    }

    if let Some(name) = env.filter(|n| !n.trim().is_empty()) {
        return finish(name, SelectionSource::Env);
    }

    let from_file = load_toml(toml_path)?
        .and_then(|toml| toml.default)
        .and_then(|d| d.network);

    match from_file {
        Some(name) => finish(&name, SelectionSource::File),
        None => Ok(Selection {
            network: Network::Development,
            source: SelectionSource::Default,
        }),
    }
}

fn finish(name: &str, source: SelectionSource) -> Result<Selection, ConfigError> {
    let network: Network = name.parse()?;
    tracing::debug!(network = %network, source = %source, "Selected network");
    Ok(Selection { network, source })
}

/// Load deploy.toml, or `None` if it does not exist
pub fn load_toml(path: &Path) -> Result<Option<DeployToml>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let parsed: DeployToml = toml::from_str(&content)?;
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_toml(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(DEPLOY_TOML);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_flag_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_toml(&dir, "[default]\nnetwork = \"kovan\"\n");

        let selection = select_network(Some("main"), Some("goerli"), &path).unwrap();
        assert_eq!(selection.network, Network::Main);
        assert_eq!(selection.source, SelectionSource::Flag);
    }

    #[test]
    fn test_env_beats_file() {
        let dir = TempDir::new().unwrap();
        let path = write_toml(&dir, "[default]\nnetwork = \"kovan\"\n");

        let selection = select_network(None, Some("goerli"), &path).unwrap();
        assert_eq!(selection.network, Network::Goerli);
        assert_eq!(selection.source, SelectionSource::Env);
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_toml(&dir, "[default]\nnetwork = \"rinkeby\"\n");

        let selection = select_network(None, Some(""), &path).unwrap();
        assert_eq!(selection.network, Network::Rinkeby);
        assert_eq!(selection.source, SelectionSource::File);
    }

    #[test]
    fn test_default_when_nothing_set() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEPLOY_TOML);

        let selection = select_network(None, None, &path).unwrap();
        assert_eq!(selection.network, Network::Development);
        assert_eq!(selection.source, SelectionSource::Default);
    }

    #[test]
    fn test_file_without_default_section() {
        let dir = TempDir::new().unwrap();
        let path = write_toml(&dir, "");

        let selection = select_network(None, None, &path).unwrap();
        assert_eq!(selection.source, SelectionSource::Default);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_toml(&dir, "[default\nnetwork = ");

        let result = select_network(None, None, &path);
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_unknown_network_in_file() {
        let dir = TempDir::new().unwrap();
        let path = write_toml(&dir, "[default]\nnetwork = \"sepolia\"\n");

        let result = select_network(None, None, &path);
        assert!(matches!(result, Err(ConfigError::UnknownNetwork(name)) if name == "sepolia"));
    }

    #[test]
    fn test_empty_flag_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_toml(&dir, "[default]\nnetwork = \"rinkeby\"\n");

        let result = select_network(Some(""), Some("goerli"), &path);
        assert!(matches!(result, Err(ConfigError::UnknownNetwork(name)) if name.is_empty()));
    }

    #[test]
    fn test_unknown_flag() {
        let dir = TempDir::new().unwrap();
        let result = select_network(Some("testnet"), None, &dir.path().join(DEPLOY_TOML));
        assert!(matches!(result, Err(ConfigError::UnknownNetwork(_))));
    }
}
