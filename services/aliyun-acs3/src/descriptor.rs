use crate::flatten::flatten_query;
use bytes::Bytes;
use http::header::HOST;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};
use percent_encoding::percent_decode_str;
use reqsign_core::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

/// RequestDescriptor describes an outbound API request before it is sent.
///
/// A request is addressed either by `url` or by `host` + `path`. Query
/// parameters may come from the url, from the structured `query` map, or
/// both; nested values in `query` are flattened before signing.
///
/// Signing only ever adds headers: method, url, query and body are left as
/// they are.
#[derive(Debug, Clone, Default)]
pub struct RequestDescriptor {
    /// HTTP method, `GET` by default.
    pub method: Method,
    /// Full request url, e.g. `https://ecs.cn-hangzhou.aliyuncs.com/?Action=DescribeRegions`.
    pub url: Option<String>,
    /// Host to use when `url` is absent or relative.
    pub host: Option<String>,
    /// Path to use when `url` is absent.
    pub path: Option<String>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Structured query parameters, may be nested.
    pub query: Map<String, Value>,
    /// Request body.
    pub body: Bytes,
}

impl RequestDescriptor {
    /// Create an empty `GET` request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `GET` request for the given url.
    pub fn get(url: &str) -> Self {
        Self::new().with_url(url)
    }

    /// Create a `POST` request for the given url.
    pub fn post(url: &str) -> Self {
        Self::new().with_method(Method::POST).with_url(url)
    }

    /// Set the method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the url.
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Set the host used when no url is given.
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    /// Set the path used when no url is given.
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Insert a header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Insert a structured query parameter.
    pub fn with_query(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.query.insert(key.to_string(), value.into());
        self
    }

    /// Merge a JSON-encoded object into the query parameters.
    ///
    /// Keys from `json` replace existing ones. Fails with `MalformedInput`
    /// when `json` is not valid JSON or not an object.
    pub fn with_query_json(mut self, json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            Error::malformed_input("query parameters must be valid JSON").with_source(e)
        })?;
        let Value::Object(params) = value else {
            return Err(Error::malformed_input(format!(
                "query parameters must be a JSON object, got: {value}"
            )));
        };

        self.query.extend(params);
        Ok(self)
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Normalize url, host, path and query into one signing target.
    ///
    /// `default_host` is used when neither the url nor the descriptor names a host.
    pub(crate) fn resolve(&self, default_host: impl FnOnce() -> String) -> Result<Target> {
        let uri = self.url.as_deref().map(Uri::from_str).transpose()?;

        let host = match uri.as_ref().and_then(|v| v.authority()) {
            Some(authority) => authority.as_str().to_string(),
            None => match (&self.host, self.headers.get(HOST)) {
                (Some(host), _) => host.clone(),
                (None, Some(host)) => host.to_str()?.to_string(),
                (None, None) => default_host(),
            },
        };

        let path = match &uri {
            Some(uri) => uri.path().to_string(),
            None => self.path.clone().unwrap_or_default(),
        };

        let mut params = BTreeMap::new();
        if let Some(query) = uri.as_ref().and_then(|v| v.query()) {
            // Repeated keys: the last one wins.
            params.extend(parse_query(query)?);
        }
        // Explicit parameters win over the url ones.
        params.extend(flatten_query(&self.query));

        Ok(Target { host, path, params })
    }
}

/// Decode `application/x-www-form-urlencoded` pairs.
///
/// `+` decodes to a space. Components that don't decode to UTF-8 fail with
/// `MalformedInput` instead of being replaced.
fn parse_query(query: &str) -> Result<Vec<(String, String)>> {
    query
        .split('&')
        .filter(|v| !v.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((decode_component(k)?, decode_component(v)?))
        })
        .collect()
}

fn decode_component(input: &str) -> Result<String> {
    let input = input.replace('+', " ");
    percent_decode_str(&input)
        .decode_utf8()
        .map(|v| v.into_owned())
        .map_err(|e| {
            Error::malformed_input(format!("query component '{input}' is not valid utf-8"))
                .with_source(e)
        })
}

/// Target is the normalized form of a request's address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    pub host: String,
    pub path: String,
    pub params: BTreeMap<String, String>,
}
