//! Secrets supplied through the environment.
//!
//! Secrets are read once by the entry point and handed to the resolver
//! explicitly. Nothing below the entry point touches the process
//! environment.

use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Environment variable holding the signing mnemonic.
pub const MNEMONIC_VAR: &str = "MNEMONIC";

/// Environment variable holding the gateway API key.
pub const API_KEY_VAR: &str = "INFURA_API_KEY";

/// Seed phrase for the signing provider, zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    phrase: String,
}

impl Mnemonic {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.phrase
    }

    pub fn word_count(&self) -> usize {
        self.phrase.split_whitespace().count()
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic(<{} words redacted>)", self.word_count())
    }
}

impl Drop for Mnemonic {
    fn drop(&mut self) {
        self.phrase.zeroize();
    }
}

/// Secrets read at process start. Empty values count as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    mnemonic: Option<Mnemonic>,
    api_key: Option<Zeroizing<String>>,
}

impl Secrets {
    pub fn new(mnemonic: Option<String>, api_key: Option<String>) -> Self {
        Self {
            mnemonic: non_empty(mnemonic).map(Mnemonic::new),
            api_key: non_empty(api_key).map(Zeroizing::new),
        }
    }

    /// Read secrets from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read secrets through an arbitrary lookup, keyed by variable name.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::new(lookup(MNEMONIC_VAR), lookup(API_KEY_VAR))
    }

    pub fn mnemonic(&self) -> Option<&Mnemonic> {
        self.mnemonic.as_ref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.as_str())
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("mnemonic", &self.mnemonic)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const PHRASE: &str = "test test test test test test test test test test test junk";

    #[test]
    fn test_empty_values_are_absent() {
        let secrets = Secrets::new(Some(String::new()), Some("   ".to_string()));
        assert!(secrets.mnemonic().is_none());
        assert!(secrets.api_key().is_none());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, String> = HashMap::from([
            (MNEMONIC_VAR, PHRASE.to_string()),
            (API_KEY_VAR, "key-1".to_string()),
        ]);
        let secrets = Secrets::from_lookup(|name| vars.get(name).cloned());

        assert_eq!(secrets.mnemonic().unwrap().as_str(), PHRASE);
        assert_eq!(secrets.api_key(), Some("key-1"));
    }

    #[test]
    fn test_from_lookup_missing() {
        let secrets = Secrets::from_lookup(|_| None);
        assert_eq!(secrets, Secrets::default());
    }

    #[test]
    fn test_clone_keeps_api_key() {
        let secrets = Secrets::new(None, Some("key-2".to_string()));
        let copy = secrets.clone();
        drop(secrets);

        assert_eq!(copy.api_key(), Some("key-2"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let secrets = Secrets::new(Some(PHRASE.to_string()), Some("key-1".to_string()));
        let printed = format!("{:?}", secrets);

        assert!(!printed.contains("junk"));
        assert!(!printed.contains("key-1"));
        assert!(printed.contains("12 words redacted"));
    }
}
