use crate::constants::ACS_ENCODE_SET;
use crate::scheme::SigningScheme;
use http::HeaderMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use reqsign_core::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write;

/// Percent-encode input per RFC 3986.
///
/// Space becomes `%20`, `*` becomes `%2A` and `~` stays as is.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, &ACS_ENCODE_SET).to_string()
}

/// Build the canonical URI: every non-empty segment encoded on its own.
///
/// Segments are decoded first so an already encoded path isn't encoded twice.
/// A segment that doesn't decode to UTF-8 fails with `MalformedInput`.
pub fn canonical_uri(path: &str) -> Result<String> {
    let path = path.strip_prefix('/').unwrap_or(path);

    let mut s = String::with_capacity(path.len() + 1);
    for segment in path.split('/') {
        s.push('/');
        if !segment.is_empty() {
            let decoded = percent_decode_str(segment).decode_utf8().map_err(|e| {
                Error::malformed_input(format!("path segment '{segment}' is not valid utf-8"))
                    .with_source(e)
            })?;
            s.push_str(&percent_encode(&decoded));
        }
    }
    Ok(s)
}

/// Build the canonical query string out of flattened parameters.
///
/// The map is already sorted by raw key in byte order.
pub fn canonical_query_string(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// CanonicalHeaders is the signed part of the request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalHeaders {
    /// `name:value\n` for every signed header, sorted by name.
    pub block: String,
    /// Lowercase names of the signed headers, sorted.
    pub names: Vec<String>,
}

impl CanonicalHeaders {
    /// Signed header names joined with `;`.
    pub fn signed_headers(&self) -> String {
        self.names.join(";")
    }
}

/// Select and render the headers covered by the signature.
///
/// A header with several values is rendered once, values joined by `,`.
pub fn canonical_headers(headers: &HeaderMap, scheme: &SigningScheme) -> Result<CanonicalHeaders> {
    // HeaderName is always lowercase, so sorting the names is case-insensitive.
    let mut names: Vec<_> = headers
        .keys()
        .filter(|name| scheme.is_signed_header(name))
        .collect();
    names.sort_unstable_by(|a, b| a.as_str().cmp(b.as_str()));

    let mut block = String::with_capacity(names.len() * 32);
    for name in &names {
        let values = headers
            .get_all(*name)
            .iter()
            .map(|v| v.to_str())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        writeln!(block, "{}:{}", name.as_str(), values.join(","))?;
    }

    Ok(CanonicalHeaders {
        block,
        names: names.iter().map(|v| v.as_str().to_string()).collect(),
    })
}

/// CanonicalRequest is the exact preimage of an ACS3 signature.
///
/// It renders as six newline-separated parts: method, canonical uri,
/// canonical query string, canonical headers, signed headers and the
/// hex encoded SHA-256 of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// HTTP method.
    pub method: String,
    /// Canonical uri, e.g. `/` or `/a%20b`.
    pub uri: String,
    /// Canonical query string, empty without parameters.
    pub query: String,
    /// Signed headers.
    pub headers: CanonicalHeaders,
    /// Hex encoded SHA-256 of the body.
    pub body_hash: String,
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.uri)?;
        writeln!(f, "{}", self.query)?;
        writeln!(f, "{}", self.headers.block)?;
        writeln!(f, "{}", self.headers.signed_headers())?;
        write!(f, "{}", self.body_hash)
    }
}
