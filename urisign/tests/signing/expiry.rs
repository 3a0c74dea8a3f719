use std::time::Duration;

use anyhow::Result;
use pretty_assertions::assert_eq;

use super::{advance, init_signer, replace_param, NOW};
use urisign::{ErrorKind, UriSigner};

#[test]
fn test_check_before_expiry() -> Result<()> {
    let signer = init_signer("s3cr3t");
    let signed = signer.sign("https://example.com/p", Some(Duration::from_secs(60)))?;

    assert!(signed.contains(&format!("_timestamp={}", NOW + 60)));
    assert!(signer.check(&signed)?);
    assert!(advance(&signer, 59).check(&signed)?);
    Ok(())
}

#[test]
fn test_check_after_expiry() -> Result<()> {
    let signer = init_signer("s3cr3t");
    let signed = signer.sign("https://example.com/p", Some(Duration::from_secs(60)))?;

    for secs in [60, 61, 3600] {
        let err = advance(&signer, secs)
            .check(&signed)
            .expect_err("url must be expired");

        let (expires_at, now) = err.expiry().expect("error must carry timestamps");
        assert_eq!(expires_at, NOW + 60);
        assert_eq!(now, NOW + secs);
        assert!(expires_at <= now);
    }
    Ok(())
}

#[test]
fn test_expired_url_with_bad_hash_is_not_expired() -> Result<()> {
    let signer = init_signer("s3cr3t");
    let signed = signer.sign("https://example.com/p", Some(Duration::from_secs(60)))?;

    // Forging a later expiry breaks the hash: the caller sees a plain failure.
    let forged = replace_param(&signed, "_timestamp", &(NOW + 86400).to_string());
    assert!(!advance(&signer, 120).check(&forged)?);
    Ok(())
}

#[test]
fn test_timestamp_conflict() {
    let signer = init_signer("s3cr3t");

    let err = signer
        .sign(
            "https://example.com/p?_timestamp=9999999999",
            Some(Duration::from_secs(60)),
        )
        .expect_err("existing timestamp must conflict");

    assert_eq!(err.kind(), ErrorKind::ParameterConflict);
}

#[test]
fn test_missing_clock() -> Result<()> {
    let signer = UriSigner::new("s3cr3t");

    let err = signer
        .sign("https://example.com/p", Some(Duration::from_secs(60)))
        .expect_err("clock is required for expiry");
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

    // Urls without expiry never need a clock.
    let signed = signer.sign("https://example.com/p", None)?;
    assert!(signer.check(&signed)?);
    Ok(())
}

#[test]
fn test_verify_expired() -> Result<()> {
    let signer = init_signer("s3cr3t");
    let signed = signer.sign("https://example.com/p", Some(Duration::from_secs(60)))?;

    signer.verify(&signed)?;

    let err = advance(&signer, 60)
        .verify(&signed)
        .expect_err("url must be expired");
    assert!(err.is_verification_error());
    assert_eq!(
        err.kind(),
        ErrorKind::UrlExpired {
            expires_at: NOW + 60,
            now: NOW + 60
        }
    );
    Ok(())
}
