use super::fixed_signer;
use http::header::{AUTHORIZATION, HOST};
use http::Request;
use pretty_assertions::assert_eq;
use reqsign_aliyun_acs3::{Credential, RequestDescriptor, StaticCredentialProvider};
use reqsign_core::{Context, SignRequest, Signer};

const NONCE: &str = "00112233445566778899aabbccddeeff0";
const URL: &str =
    "https://ecs.cn-hangzhou.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26";

#[tokio::test]
async fn test_sign_request_matches_descriptor() {
    let cred = Credential::new("AK", "SK");

    let (mut parts, _) = Request::get(URL).body(()).unwrap().into_parts();
    fixed_signer(NONCE)
        .sign_request(&Context::new(), &mut parts, Some(&cred), None)
        .await
        .unwrap();

    assert_eq!(
        parts.headers[AUTHORIZATION],
        "ACS3-HMAC-SHA256 Credential=AK,\
         SignedHeaders=host;x-acs-action;x-acs-content-sha256;x-acs-date;x-acs-signature-nonce;x-acs-version,\
         Signature=23dfc76fb6d108285baccee3c69bc8208104c603a0f11c35c4f68e740aeff6d5"
    );
    assert_eq!(parts.uri, URL);
}

#[tokio::test]
async fn test_relative_uri_uses_host_header() {
    let cred = Credential::new("AK", "SK");

    let (mut parts, _) = Request::get("/?Action=DescribeRegions&Version=2014-05-26")
        .header(HOST, "ecs.cn-hangzhou.aliyuncs.com")
        .body(())
        .unwrap()
        .into_parts();
    fixed_signer(NONCE)
        .sign_request(&Context::new(), &mut parts, Some(&cred), None)
        .await
        .unwrap();

    let mut desc = RequestDescriptor::get(URL);
    fixed_signer(NONCE).sign(&mut desc, &cred).unwrap();

    assert_eq!(parts.headers[AUTHORIZATION], desc.headers[AUTHORIZATION]);
}

#[tokio::test]
async fn test_signer_with_static_provider() {
    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new("AK", "SK"),
        fixed_signer(NONCE),
    );

    let (mut parts, _) = Request::get(URL).body(()).unwrap().into_parts();
    signer.sign(&mut parts, None).await.unwrap();

    let mut desc = RequestDescriptor::get(URL);
    fixed_signer(NONCE)
        .sign(&mut desc, &Credential::new("AK", "SK"))
        .unwrap();
    assert_eq!(parts.headers[AUTHORIZATION], desc.headers[AUTHORIZATION]);
}
