mod golden;
mod parts;
mod properties;

use reqsign_aliyun_acs3::RequestSigner;
use reqsign_core::time::parse_rfc3339;

/// Signer with time and nonce pinned so results are reproducible.
pub fn fixed_signer(nonce: &str) -> RequestSigner {
    let _ = env_logger::builder().is_test(true).try_init();

    RequestSigner::new()
        .with_time(parse_rfc3339("2024-01-01T00:00:00Z").expect("time must be valid"))
        .with_nonce(nonce)
}
