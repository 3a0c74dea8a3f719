use std::time::Duration;

use anyhow::Result;
use http::header::HOST;
use http::Request;

use super::{advance, init_signer};
use urisign::{ErrorKind, IncomingRequest};

/// A request served below a mount point, like an application behind a
/// path prefix.
struct MountedRequest {
    base_path: &'static str,
    path_info: &'static str,
    query: String,
}

impl IncomingRequest for MountedRequest {
    fn scheme_and_host(&self) -> String {
        "https://example.com".to_string()
    }

    fn base_path(&self) -> &str {
        self.base_path
    }

    fn path_info(&self) -> &str {
        self.path_info
    }

    fn raw_query(&self) -> Option<&str> {
        Some(self.query.as_str())
    }
}

#[test]
fn test_check_request_with_absolute_uri() -> Result<()> {
    let signer = init_signer("s3cr3t");
    let signed = signer.sign("https://example.com/report?id=42", None)?;

    let req = Request::get(signed.as_str()).body(())?;
    assert!(signer.check_request(&req)?);

    let req = Request::get(signed.replace("id=42", "id=43").as_str()).body(())?;
    assert!(!signer.check_request(&req)?);
    Ok(())
}

#[test]
fn test_check_request_with_host_header() -> Result<()> {
    let signer = init_signer("s3cr3t");
    let signed = signer.sign("http://example.com/report?id=42", None)?;
    let path_and_query = signed.trim_start_matches("http://example.com");

    let (parts, _) = Request::get(path_and_query)
        .header(HOST, "example.com")
        .body(())?
        .into_parts();

    assert!(signer.check_request(&parts)?);
    Ok(())
}

#[test]
fn test_check_request_keeps_raw_query_order() -> Result<()> {
    let signer = init_signer("s3cr3t");
    let signed = signer.sign("https://example.com/app/download?file=a.pdf&v=2", None)?;
    let (_, query) = signed.split_once('?').expect("signed url must have query");

    let req = MountedRequest {
        base_path: "/app",
        path_info: "/download",
        query: query.to_string(),
    };
    assert!(signer.check_request(&req)?);

    let req = MountedRequest {
        base_path: "",
        path_info: "/download",
        query: query.to_string(),
    };
    assert!(!signer.check_request(&req)?);
    Ok(())
}

#[test]
fn test_check_request_expired() -> Result<()> {
    let signer = init_signer("s3cr3t");
    let signed = signer.sign("https://example.com/p", Some(Duration::from_secs(60)))?;
    let req = Request::get(signed.as_str()).body(())?;

    assert!(signer.check_request(&req)?);

    let err = advance(&signer, 60)
        .check_request(&req)
        .expect_err("url must be expired");
    assert!(matches!(err.kind(), ErrorKind::UrlExpired { .. }));
    Ok(())
}
