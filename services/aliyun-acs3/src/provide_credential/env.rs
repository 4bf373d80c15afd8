use crate::{constants::*, Credential};
use async_trait::async_trait;
use log::debug;
use reqsign_core::utils::Redact;
use reqsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads Aliyun credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `ALIBABA_CLOUD_ACCESS_KEY_ID`: The Alibaba Cloud access key ID
/// - `ALIBABA_CLOUD_ACCESS_KEY_SECRET`: The Alibaba Cloud access key secret
/// - `ALIBABA_CLOUD_SECURITY_TOKEN`: The Alibaba Cloud security token (optional)
/// - `ALIBABA_CLOUD_REGION_ID`: The region to sign for (optional, `cn-hangzhou` by default)
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        let access_key_id = envs.get(ALIBABA_CLOUD_ACCESS_KEY_ID);
        let access_key_secret = envs.get(ALIBABA_CLOUD_ACCESS_KEY_SECRET);

        match (access_key_id, access_key_secret) {
            (Some(ak), Some(sk)) => {
                debug!("loaded credential from env: {:?}", Redact::from(ak));
                Ok(Some(Credential {
                    access_key_id: ak.clone(),
                    access_key_secret: sk.clone(),
                    security_token: envs.get(ALIBABA_CLOUD_SECURITY_TOKEN).cloned(),
                    region: envs
                        .get(ALIBABA_CLOUD_REGION_ID)
                        .cloned()
                        .unwrap_or_else(|| DEFAULT_REGION.to_string()),
                }))
            }
            _ => {
                debug!("access key pair not found in env");
                Ok(None)
            }
        }
    }
}
