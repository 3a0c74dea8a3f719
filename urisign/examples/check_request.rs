use std::time::Duration;

use urisign::{ErrorKind, OsClock, Result, UriSigner};

fn main() -> Result<()> {
    env_logger::init();

    let signer = UriSigner::new("demo-secret").with_clock(OsClock);
    let signed = signer.sign(
        "https://example.com/download?file=report.pdf",
        Some(Duration::from_secs(300)),
    )?;

    // Simulate the inbound request an http server would hand us.
    let req = http::Request::get(signed.as_str())
        .body(())
        .map_err(|e| urisign::Error::unexpected("failed to build request").with_source(e))?;

    match signer.check_request(&req) {
        Ok(true) => println!("request url is valid"),
        Ok(false) => println!("request url is not authentic"),
        Err(e) if matches!(e.kind(), ErrorKind::UrlExpired { .. }) => {
            println!("request url expired: {e}")
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
