use crate::{Config, Credential};
use async_trait::async_trait;
use log::debug;
use reqsign_core::utils::Redact;
use reqsign_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// ConfigCredentialProvider builds a credential out of a [`Config`].
///
/// Returns `None` unless both the access key id and secret are set.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let (Some(ak), Some(sk)) = (&self.config.access_key_id, &self.config.access_key_secret)
        else {
            debug!("access key pair not found in config");
            return Ok(None);
        };

        debug!("loaded credential from config: {:?}", Redact::from(ak));
        Ok(Some(Credential {
            access_key_id: ak.clone(),
            access_key_secret: sk.clone(),
            security_token: self.config.security_token.clone(),
            region: self.config.region().to_string(),
        }))
    }
}
