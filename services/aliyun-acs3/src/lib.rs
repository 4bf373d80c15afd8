//! Alibaba Cloud ACS3-HMAC-SHA256 signing implementation for reqsign.
//!
//! This crate signs Alibaba Cloud OpenAPI (RPC style) requests with the V3
//! signature, the scheme shared by ECS, VPC, RAM and most other products.
//!
//! ## Overview
//!
//! A request is described by a [`RequestDescriptor`]: method, url or host
//! plus path, headers, nested query parameters and body. [`RequestSigner`]
//! flattens the query, builds the [`CanonicalRequest`], and adds the
//! `x-acs-*` headers together with `Authorization`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use reqsign_aliyun_acs3::{Credential, RequestDescriptor, RequestSigner};
//!
//! # fn main() -> reqsign_core::Result<()> {
//! let cred = Credential::new("your-access-key-id", "your-access-key-secret");
//!
//! let mut req = RequestDescriptor::get(
//!     "https://ecs.cn-hangzhou.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26",
//! );
//! RequestSigner::new().sign(&mut req, &cred)?;
//!
//! println!("{:?}", req.headers.get("authorization"));
//! # Ok(())
//! # }
//! ```
//!
//! ## With `http` requests
//!
//! [`RequestSigner`] implements [`reqsign_core::SignRequest`], so it plugs
//! into [`reqsign_core::Signer`] with any credential provider:
//!
//! ```no_run
//! use reqsign_aliyun_acs3::{DefaultCredentialProvider, RequestSigner};
//! use reqsign_core::{Context, OsEnv, Signer};
//!
//! #[tokio::main]
//! async fn main() -> reqsign_core::Result<()> {
//!     let ctx = Context::new().with_env(OsEnv);
//!     let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
//!
//!     let mut req = http::Request::get(
//!         "https://ecs.cn-hangzhou.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26",
//!     )
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//!
//!     signer.sign(&mut req, None).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ### Environment Variables
//!
//! ```bash
//! export ALIBABA_CLOUD_ACCESS_KEY_ID=your-access-key-id
//! export ALIBABA_CLOUD_ACCESS_KEY_SECRET=your-access-key-secret
//! export ALIBABA_CLOUD_SECURITY_TOKEN=your-sts-token  # optional
//! export ALIBABA_CLOUD_REGION_ID=cn-beijing          # optional
//! ```
//!
//! ### Config
//!
//! ```no_run
//! use reqsign_aliyun_acs3::{Config, DefaultCredentialProvider};
//! use std::sync::Arc;
//!
//! let config = Config {
//!     access_key_id: Some("your-access-key-id".to_string()),
//!     access_key_secret: Some("your-access-key-secret".to_string()),
//!     ..Default::default()
//! };
//! let provider = DefaultCredentialProvider::with_config(Arc::new(config));
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;
pub use constants::{
    ALIBABA_CLOUD_ACCESS_KEY_ID, ALIBABA_CLOUD_ACCESS_KEY_SECRET, ALIBABA_CLOUD_REGION_ID,
    ALIBABA_CLOUD_SECURITY_TOKEN, DEFAULT_PRODUCT, DEFAULT_REGION,
};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod descriptor;
pub use descriptor::RequestDescriptor;

mod flatten;
pub use flatten::flatten_query;

mod canonical;
pub use canonical::{
    canonical_headers, canonical_query_string, canonical_uri, percent_encode, CanonicalHeaders,
    CanonicalRequest,
};

mod scheme;
pub use scheme::{SigningScheme, ACS3_HMAC_SHA256};

mod sign_request;
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::*;

pub mod ecs;
