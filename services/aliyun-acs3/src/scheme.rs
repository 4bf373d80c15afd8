use http::header::{CONTENT_TYPE, HOST};
use http::HeaderName;
use reqsign_core::{Error, Result};

/// Algorithm identifier of Alibaba Cloud's V3 signature.
pub const ACS3_HMAC_SHA256: &str = "ACS3-HMAC-SHA256";

/// SigningScheme carries what differs between sibling HMAC-SHA256 schemes.
///
/// The algorithm identifier is used verbatim both as the first line of the
/// string to sign and as the `Authorization` scheme. The header prefix
/// decides which headers get signed and names the headers the signer sets.
/// Headers outside the prefix can be added to the allow-list; `host` and
/// `content-type` are always on it.
#[derive(Debug, Clone)]
pub struct SigningScheme {
    algorithm: String,
    prefix: String,
    allow_list: Vec<HeaderName>,

    date: HeaderName,
    nonce: HeaderName,
    action: HeaderName,
    version: HeaderName,
    content_sha256: HeaderName,
    security_token: HeaderName,
}

impl Default for SigningScheme {
    fn default() -> Self {
        Self::acs3()
    }
}

impl SigningScheme {
    /// The `ACS3-HMAC-SHA256` scheme with `x-acs-` headers.
    pub fn acs3() -> Self {
        Self {
            algorithm: ACS3_HMAC_SHA256.to_string(),
            prefix: "x-acs-".to_string(),
            allow_list: vec![HOST, CONTENT_TYPE],

            date: HeaderName::from_static("x-acs-date"),
            nonce: HeaderName::from_static("x-acs-signature-nonce"),
            action: HeaderName::from_static("x-acs-action"),
            version: HeaderName::from_static("x-acs-version"),
            content_sha256: HeaderName::from_static("x-acs-content-sha256"),
            security_token: HeaderName::from_static("x-acs-security-token"),
        }
    }

    /// Build a scheme with another algorithm identifier and header prefix.
    ///
    /// The prefix is matched case-insensitively, e.g. `x-acs-`.
    pub fn new(algorithm: &str, header_prefix: &str) -> Result<Self> {
        if algorithm.is_empty() || algorithm.chars().any(|c| c.is_whitespace()) {
            return Err(Error::config_invalid(format!(
                "algorithm identifier '{algorithm}' must be a non-empty token"
            )));
        }
        let prefix = header_prefix.to_ascii_lowercase();
        if prefix.is_empty() {
            return Err(Error::config_invalid("header prefix must not be empty"));
        }

        let header = |suffix: &str| HeaderName::try_from(format!("{prefix}{suffix}"));
        Ok(Self {
            algorithm: algorithm.to_string(),
            allow_list: vec![HOST, CONTENT_TYPE],

            date: header("date")?,
            nonce: header("signature-nonce")?,
            action: header("action")?,
            version: header("version")?,
            content_sha256: header("content-sha256")?,
            security_token: header("security-token")?,
            prefix,
        })
    }

    /// Sign the given header even though it doesn't carry the prefix.
    pub fn with_signed_header(mut self, name: HeaderName) -> Self {
        if !self.allow_list.contains(&name) {
            self.allow_list.push(name);
        }
        self
    }

    /// Algorithm identifier, e.g. `ACS3-HMAC-SHA256`.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Lowercase header prefix, e.g. `x-acs-`.
    pub fn header_prefix(&self) -> &str {
        &self.prefix
    }

    /// Check if a header takes part in the signature.
    pub fn is_signed_header(&self, name: &HeaderName) -> bool {
        // HeaderName is always lowercase.
        name.as_str().starts_with(&self.prefix) || self.allow_list.contains(name)
    }

    pub(crate) fn date_header(&self) -> &HeaderName {
        &self.date
    }

    pub(crate) fn nonce_header(&self) -> &HeaderName {
        &self.nonce
    }

    pub(crate) fn action_header(&self) -> &HeaderName {
        &self.action
    }

    pub(crate) fn version_header(&self) -> &HeaderName {
        &self.version
    }

    pub(crate) fn content_sha256_header(&self) -> &HeaderName {
        &self.content_sha256
    }

    pub(crate) fn security_token_header(&self) -> &HeaderName {
        &self.security_token
    }
}
