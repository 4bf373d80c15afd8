use crate::canonical::{canonical_headers, canonical_query_string, canonical_uri, CanonicalRequest};
use crate::constants::{DEFAULT_PRODUCT, QUERY_ACTION, QUERY_VERSION};
use crate::credential::Credential;
use crate::descriptor::{RequestDescriptor, Target};
use crate::scheme::SigningScheme;
use async_trait::async_trait;
use http::header::{AUTHORIZATION, HOST};
use http::{HeaderMap, HeaderValue};
use log::debug;
use rand::RngCore;
use reqsign_core::hash::{hex_hmac_sha256, hex_sha256};
use reqsign_core::time::{format_iso8601, now, DateTime};
use reqsign_core::{Context, Error, Result, SignRequest, SigningCredential};
use std::collections::BTreeMap;
use std::time::Duration;

/// RequestSigner that implements Alibaba Cloud's ACS3-HMAC-SHA256 signature.
///
/// - [ACS3 signature](https://www.alibabacloud.com/help/en/sdk/product-overview/v3-request-structure-and-signature)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    scheme: SigningScheme,
    product: String,

    time: Option<DateTime>,
    nonce: Option<String>,
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSigner {
    /// Create a signer for the ACS3 scheme targeting `ecs`.
    pub fn new() -> Self {
        Self {
            scheme: SigningScheme::acs3(),
            product: DEFAULT_PRODUCT.to_string(),
            time: None,
            nonce: None,
        }
    }

    /// Sign with another scheme.
    pub fn with_scheme(mut self, scheme: SigningScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the product used to derive `<product>.<region>.aliyuncs.com`
    /// for requests that carry no host.
    pub fn with_product(mut self, product: &str) -> Self {
        self.product = product.to_string();
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the signature nonce.
    ///
    /// # Note
    ///
    /// A nonce must never be reused. Only use this function for testing.
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    /// The scheme this signer signs with.
    pub fn scheme(&self) -> &SigningScheme {
        &self.scheme
    }

    /// Sign the request in place.
    ///
    /// On success the request gains `host`, the scheme's date, nonce,
    /// action, version and content hash headers, the security token header
    /// if the credential has one, and `Authorization`. On error the request
    /// is left untouched.
    pub fn sign(&self, req: &mut RequestDescriptor, cred: &Credential) -> Result<()> {
        let body_hash = hex_sha256(&req.body);
        let (_, headers) = self.build(req, cred, body_hash)?;
        req.headers = headers;
        Ok(())
    }

    /// Build the canonical request `sign` would compute for this request.
    ///
    /// Unless both time and nonce are fixed, every call yields a fresh one.
    pub fn canonical_request(
        &self,
        req: &RequestDescriptor,
        cred: &Credential,
    ) -> Result<CanonicalRequest> {
        let body_hash = hex_sha256(&req.body);
        let (creq, _) = self.build(req, cred, body_hash)?;
        Ok(creq)
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    fn get_nonce(&self) -> String {
        match &self.nonce {
            Some(v) => v.clone(),
            None => {
                let mut buf = [0u8; 16];
                rand::thread_rng().fill_bytes(&mut buf);
                hex::encode(buf)
            }
        }
    }

    /// Compute the signed header map without touching `req`.
    fn build(
        &self,
        req: &RequestDescriptor,
        cred: &Credential,
        body_hash: String,
    ) -> Result<(CanonicalRequest, HeaderMap)> {
        if !cred.is_valid() {
            return Err(Error::credential_invalid(
                "access key id and access key secret must not be empty",
            ));
        }

        let Target { host, path, params } =
            req.resolve(|| format!("{}.{}.aliyuncs.com", self.product, cred.region))?;
        let action = required_param(&params, QUERY_ACTION)?;
        let version = required_param(&params, QUERY_VERSION)?;

        let mut headers = req.headers.clone();
        headers.insert(HOST, host.parse()?);
        headers.insert(
            self.scheme.date_header().clone(),
            format_iso8601(self.get_time()).parse()?,
        );
        headers.insert(self.scheme.nonce_header().clone(), self.get_nonce().parse()?);
        headers.insert(self.scheme.action_header().clone(), action.parse()?);
        headers.insert(self.scheme.version_header().clone(), version.parse()?);
        headers.insert(self.scheme.content_sha256_header().clone(), body_hash.parse()?);
        if let Some(token) = &cred.security_token {
            let mut value: HeaderValue = token.parse()?;
            value.set_sensitive(true);
            headers.insert(self.scheme.security_token_header().clone(), value);
        }

        let creq = CanonicalRequest {
            method: req.method.as_str().to_string(),
            uri: canonical_uri(&path)?,
            query: canonical_query_string(&params),
            headers: canonical_headers(&headers, &self.scheme)?,
            body_hash,
        };
        let creq_str = creq.to_string();
        debug!("calculated canonical request: {creq_str}");

        let string_to_sign = format!(
            "{}\n{}",
            self.scheme.algorithm(),
            hex_sha256(creq_str.as_bytes())
        );
        debug!("calculated string to sign: {string_to_sign}");

        let signature = hex_hmac_sha256(
            cred.access_key_secret.as_bytes(),
            string_to_sign.as_bytes(),
        );

        let auth = format!(
            "{} Credential={},SignedHeaders={},Signature={}",
            self.scheme.algorithm(),
            cred.access_key_id,
            creq.headers.signed_headers(),
            signature
        );
        let mut value: HeaderValue = auth.parse()?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);

        Ok((creq, headers))
    }
}

fn required_param<'a>(params: &'a BTreeMap<String, String>, key: &str) -> Result<&'a str> {
    match params.get(key).map(String::as_str) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::missing_parameter(format!(
            "query parameter '{key}' is required but not present"
        ))),
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Ok(());
        };
        if expires_in.is_some() {
            return Err(Error::request_invalid(
                "ACS3 signature doesn't support presigned requests",
            ));
        }

        let desc = RequestDescriptor {
            method: req.method.clone(),
            url: Some(req.uri.to_string()),
            headers: req.headers.clone(),
            ..Default::default()
        };

        // Parts carry no body, trust the hash the caller computed if any.
        let body_hash = match req.headers.get(self.scheme.content_sha256_header()) {
            Some(v) => v.to_str()?.to_string(),
            None => hex_sha256(b""),
        };

        let (_, headers) = self.build(&desc, cred, body_hash)?;
        req.headers = headers;
        Ok(())
    }
}
