use super::fixed_signer;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HOST};
use http::{HeaderValue, Method};
use pretty_assertions::assert_eq;
use reqsign_aliyun_acs3::{Credential, RequestDescriptor};
use serde_json::json;

#[test]
fn test_describe_regions_golden() {
    let signer = fixed_signer("00112233445566778899aabbccddeeff0");
    let cred = Credential::new("AK", "SK").with_region("cn-hangzhou");
    let mut req = RequestDescriptor::get(
        "https://ecs.cn-hangzhou.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26",
    );

    let creq = signer.canonical_request(&req, &cred).unwrap();
    assert_eq!(
        creq.to_string(),
        "GET\n\
         /\n\
         Action=DescribeRegions&Version=2014-05-26\n\
         host:ecs.cn-hangzhou.aliyuncs.com\n\
         x-acs-action:DescribeRegions\n\
         x-acs-content-sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855\n\
         x-acs-date:2024-01-01T00:00:00Z\n\
         x-acs-signature-nonce:00112233445566778899aabbccddeeff0\n\
         x-acs-version:2014-05-26\n\
         \n\
         host;x-acs-action;x-acs-content-sha256;x-acs-date;x-acs-signature-nonce;x-acs-version\n\
         e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );

    signer.sign(&mut req, &cred).unwrap();
    assert_eq!(
        req.headers[AUTHORIZATION],
        "ACS3-HMAC-SHA256 Credential=AK,\
         SignedHeaders=host;x-acs-action;x-acs-content-sha256;x-acs-date;x-acs-signature-nonce;x-acs-version,\
         Signature=23dfc76fb6d108285baccee3c69bc8208104c603a0f11c35c4f68e740aeff6d5"
    );
    assert_eq!(req.headers[HOST], "ecs.cn-hangzhou.aliyuncs.com");
    assert_eq!(req.headers["x-acs-date"], "2024-01-01T00:00:00Z");
    assert_eq!(
        req.headers["x-acs-signature-nonce"],
        "00112233445566778899aabbccddeeff0"
    );
}

#[test]
fn test_post_with_token_and_nested_query_golden() {
    let signer = fixed_signer("00112233445566778899aabbccddeeff");
    let cred = Credential::new("AK", "SK")
        .with_region("cn-beijing")
        .with_security_token("sts-token");
    let mut req = RequestDescriptor::new()
        .with_method(Method::POST)
        .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .with_query("Action", "RunInstances")
        .with_query("Version", "2014-05-26")
        .with_query("Amount", 2)
        .with_query("Tag", json!([{"Key": "env", "Value": "prod *"}]))
        .with_body(r#"{"a":1}"#);

    signer.sign(&mut req, &cred).unwrap();

    assert_eq!(req.headers[HOST], "ecs.cn-beijing.aliyuncs.com");
    assert_eq!(req.headers["x-acs-security-token"], "sts-token");
    assert_eq!(
        req.headers["x-acs-content-sha256"],
        "015abd7f5cc57a2dd94b7590f04ad8084273905ee33ec5cebeae62276a97f862"
    );
    assert_eq!(
        req.headers[AUTHORIZATION],
        "ACS3-HMAC-SHA256 Credential=AK,\
         SignedHeaders=content-type;host;x-acs-action;x-acs-content-sha256;x-acs-date;\
         x-acs-security-token;x-acs-signature-nonce;x-acs-version,\
         Signature=eb9e88917748bd52944d5602d1aa968dae4774abaaaa4ae3ef21fa4894a2b221"
    );
}
