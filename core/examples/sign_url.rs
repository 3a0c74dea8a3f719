use std::time::Duration;

use urisign_core::{Config, OsClock, OsEnv, Result, UriSigner};

fn main() -> Result<()> {
    env_logger::init();

    // Load the secret from URISIGN_SECRET, falling back to a demo secret.
    let config = Config::new().from_env(&OsEnv);
    let config = match config.secret {
        Some(_) => config,
        None => {
            println!("URISIGN_SECRET is not set, using demo secret");
            config.with_secret("demo-secret")
        }
    };

    let signer = UriSigner::from_config(config)?.with_clock(OsClock);

    let signed = signer.sign(
        "https://example.com/download?file=report.pdf",
        Some(Duration::from_secs(300)),
    )?;
    println!("signed url: {signed}");

    match signer.check(&signed) {
        Ok(true) => println!("url is valid"),
        Ok(false) => println!("url is not authentic"),
        Err(e) => eprintln!("failed to check url: {e}"),
    }

    let tampered = signed.replace("report.pdf", "secrets.pdf");
    println!("tampered url valid: {}", signer.check(&tampered)?);

    Ok(())
}
