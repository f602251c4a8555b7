//! Signing provider construction.
//!
//! Key derivation and RPC transport belong to the wallet library; this
//! crate only decides *when* a provider is built and with what inputs.
//! A [`LazyProvider`] calls its factory at most once, on first use.

use std::cell::OnceCell;

use crate::secrets::Mnemonic;

/// Builds a signing provider for a remote endpoint.
pub trait SigningProviderFactory {
    type Provider;
    type Error;

    fn create(&self, mnemonic: &Mnemonic, endpoint: &str) -> Result<Self::Provider, Self::Error>;
}

/// Handle to a signing provider that is constructed on first use.
pub struct LazyProvider<'a, F: SigningProviderFactory> {
    factory: &'a F,
    target: Option<(&'a Mnemonic, &'a str)>,
    provider: OnceCell<F::Provider>,
}

impl<'a, F: SigningProviderFactory> LazyProvider<'a, F> {
    /// Handle for a local node. No provider is ever built.
    pub fn local(factory: &'a F) -> Self {
        Self {
            factory,
            target: None,
            provider: OnceCell::new(),
        }
    }

    pub fn remote(factory: &'a F, mnemonic: &'a Mnemonic, endpoint: &'a str) -> Self {
        Self {
            factory,
            target: Some((mnemonic, endpoint)),
            provider: OnceCell::new(),
        }
    }

    /// Get the provider, building it on the first call.
    ///
    /// Returns `Ok(None)` for a local node. A failed build is not cached, so
    /// a later call tries again.
    pub fn get(&self) -> Result<Option<&F::Provider>, F::Error> {
        let Some((mnemonic, endpoint)) = self.target else {
            return Ok(None);
        };

        if let Some(provider) = self.provider.get() {
            return Ok(Some(provider));
        }

        let provider = self.factory.create(mnemonic, endpoint)?;
        tracing::debug!("Signing provider constructed");
        Ok(Some(self.provider.get_or_init(|| provider)))
    }

    pub fn is_built(&self) -> bool {
        self.provider.get().is_some()
    }
}
