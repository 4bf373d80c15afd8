use super::fixed_signer;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use pretty_assertions::assert_eq;
use reqsign_aliyun_acs3::ecs::Operation;
use reqsign_aliyun_acs3::{Credential, RequestDescriptor, RequestSigner};
use reqsign_core::ErrorKind;
use serde_json::json;
use test_case::test_case;

const NONCE: &str = "00112233445566778899aabbccddeeff";

fn cred() -> Credential {
    Credential::new("AK", "SK")
}

fn sign(req: RequestDescriptor) -> RequestDescriptor {
    let mut req = req;
    fixed_signer(NONCE).sign(&mut req, &cred()).unwrap();
    req
}

fn auth(req: &RequestDescriptor) -> &str {
    req.headers[AUTHORIZATION].to_str().unwrap()
}

#[test]
fn test_url_and_query_map_are_equivalent() {
    let by_url = sign(RequestDescriptor::get(
        "https://ecs.cn-hangzhou.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26",
    ));
    let by_map = sign(
        RequestDescriptor::new()
            .with_host("ecs.cn-hangzhou.aliyuncs.com")
            .with_query("Version", "2014-05-26")
            .with_query("Action", "DescribeRegions"),
    );

    assert_eq!(auth(&by_url), auth(&by_map));
}

#[test]
fn test_nested_query_is_flattened_before_signing() {
    let nested = sign(
        RequestDescriptor::new()
            .with_query("Action", "DescribeInstances")
            .with_query("Version", "2014-05-26")
            .with_query("Tag", json!([{"Key": "a", "Value": "b"}]))
            .with_query("InstanceIds", json!(["i-1", "i-2"])),
    );
    let flat = sign(
        RequestDescriptor::new()
            .with_query("Action", "DescribeInstances")
            .with_query("Version", "2014-05-26")
            .with_query("Tag.1.Key", "a")
            .with_query("Tag.1.Value", "b")
            .with_query("InstanceIds", r#"["i-1","i-2"]"#),
    );

    assert_eq!(auth(&nested), auth(&flat));
}

#[test]
fn test_explicit_query_overrides_url() {
    let overridden = sign(
        RequestDescriptor::get(
            "https://ecs.cn-hangzhou.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26&PageSize=10",
        )
        .with_query("PageSize", 50),
    );
    let expected = sign(RequestDescriptor::get(
        "https://ecs.cn-hangzhou.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26&PageSize=50",
    ));

    assert_eq!(auth(&overridden), auth(&expected));
}

#[test]
fn test_repeated_url_keys_last_wins() {
    let repeated = sign(RequestDescriptor::get(
        "https://ecs.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26&A=1&A=2",
    ));
    let single = sign(RequestDescriptor::get(
        "https://ecs.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26&A=2",
    ));

    assert_eq!(auth(&repeated), auth(&single));
}

#[test]
fn test_encoded_and_plain_path_sign_the_same() {
    let plain = sign(
        RequestDescriptor::new()
            .with_host("ecs.aliyuncs.com")
            .with_path("/a b/c")
            .with_query("Action", "DescribeRegions")
            .with_query("Version", "2014-05-26"),
    );
    let encoded = sign(RequestDescriptor::get(
        "https://ecs.aliyuncs.com/a%20b/c?Action=DescribeRegions&Version=2014-05-26",
    ));

    assert_eq!(auth(&plain), auth(&encoded));
}

#[test]
fn test_unsigned_headers_do_not_change_signature() {
    let base = RequestDescriptor::get(
        "https://ecs.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26",
    );
    let a = sign(base.clone());
    let b = sign(base.with_header(
        http::header::USER_AGENT,
        HeaderValue::from_static("reqsign-test"),
    ));

    assert_eq!(auth(&a), auth(&b));
    assert_eq!(b.headers[http::header::USER_AGENT], "reqsign-test");
}

#[test]
fn test_signed_headers_change_signature() {
    let base = RequestDescriptor::get(
        "https://ecs.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26",
    );
    let a = sign(base.clone());
    let b = sign(base.clone().with_header(CONTENT_TYPE, HeaderValue::from_static("application/json")));
    let c = sign(base.with_header(
        http::HeaderName::from_static("x-acs-meta"),
        HeaderValue::from_static("1"),
    ));

    assert_ne!(auth(&a), auth(&b));
    assert_ne!(auth(&a), auth(&c));
    assert!(auth(&c).contains(";x-acs-meta;"));
}

#[test]
fn test_method_changes_signature() {
    let url = "https://ecs.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26";
    let get = sign(RequestDescriptor::get(url));
    let post = sign(RequestDescriptor::post(url));

    assert_eq!(post.method, Method::POST);
    assert_ne!(auth(&get), auth(&post));
}

#[test_case("https://ecs.aliyuncs.com/", ErrorKind::MissingParameter; "no parameters")]
#[test_case("https://ecs.aliyuncs.com/?Action=DescribeRegions", ErrorKind::MissingParameter; "no version")]
#[test_case("https://ecs.aliyuncs.com/?Version=2014-05-26", ErrorKind::MissingParameter; "no action")]
#[test_case("https://ecs.aliyuncs.com/?Action=DescribeRegions&Version=", ErrorKind::MissingParameter; "empty version")]
#[test_case("https://bad host/?Action=DescribeRegions&Version=2014-05-26", ErrorKind::MalformedInput; "bad url")]
#[test_case("https://ecs.aliyuncs.com/?Action=DescribeRegions&Version=2014-05-26&k=%FF", ErrorKind::MalformedInput; "non utf8 query value")]
#[test_case("https://ecs.aliyuncs.com/%FF?Action=DescribeRegions&Version=2014-05-26", ErrorKind::MalformedInput; "non utf8 path")]
fn test_sign_failures_leave_request_untouched(url: &str, kind: ErrorKind) {
    let mut req = RequestDescriptor::get(url).with_body("payload");
    let err = fixed_signer(NONCE).sign(&mut req, &cred()).unwrap_err();

    assert_eq!(err.kind(), kind);
    assert!(err.is_authentication_error());
    assert!(req.headers.is_empty());
    assert_eq!(req.body, "payload");
}

#[test]
fn test_ecs_operation_signs() {
    let cred = Credential::new("AK", "SK").with_region("cn-shanghai");
    let mut req = Operation::DescribeSecurityGroupAttribute {
        security_group_id: "sg-123".to_string(),
    }
    .into_request(&cred.region)
    .unwrap();

    RequestSigner::new().sign(&mut req, &cred).unwrap();

    assert_eq!(req.headers["host"], "ecs.cn-shanghai.aliyuncs.com");
    assert_eq!(req.headers["x-acs-action"], "DescribeSecurityGroupAttribute");
    assert_eq!(req.headers["x-acs-version"], "2014-05-26");
}
